use anyhow::Result;
use tracing::{error, info};

use plant_model_server::config::ServerConfig;
use plant_model_server::device::{select_device, CandleProbe};
use plant_model_server::runtime::InferenceRuntime;
use plant_model_server::{logging, server};

#[actix_web::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ServerConfig::default();
    info!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "server configuration"
    );

    let runtime = InferenceRuntime::new(select_device(&CandleProbe));

    println!("Server starting...");

    match server::run(&config, runtime, server::no_routes).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!(error = %err, "Server failed");
            Err(err.into())
        }
    }
}
