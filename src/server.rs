use std::net::SocketAddr;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpServer};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::BootstrapError;
use crate::runtime::InferenceRuntime;

/// Route registration hook for a bare server. Inference routes are mounted
/// by passing a different `configure` to [`bind`].
pub fn no_routes(_cfg: &mut web::ServiceConfig) {}

/// Builds the application: shared runtime, CORS on every route, then
/// whatever `configure` registers.
pub fn build_app<F>(
    config: &ServerConfig,
    runtime: web::Data<InferenceRuntime>,
    configure: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    App::new()
        .app_data(runtime)
        .configure(configure)
        .wrap(config.cors.middleware())
}

/// A listener that is bound but not yet serving. Calling [`BoundServer::serve`]
/// consumes it, so a server can't go back to initializing.
pub struct BoundServer {
    server: Server,
    addrs: Vec<SocketAddr>,
}

impl BoundServer {
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Runs until shutdown.
    pub async fn serve(self) -> Result<(), BootstrapError> {
        let BoundServer { server, addrs } = self;
        info!(addrs = ?addrs, "serving");
        server.await.map_err(BootstrapError::Serve)
    }
}

/// Binds the listener. Fails fast if the address is taken.
pub fn bind<F>(
    config: &ServerConfig,
    runtime: InferenceRuntime,
    configure: F,
) -> Result<BoundServer, BootstrapError>
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let runtime = web::Data::new(runtime);
    let app_config = config.clone();
    let addr = config.bind_addr();

    let factory = move || build_app(&app_config, runtime.clone(), configure.clone());
    let server = HttpServer::new(factory)
        .workers(config.workers)
        .bind((config.host.as_str(), config.port))
        .map_err(|source| BootstrapError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let addrs = server.addrs();
    info!(addr = %addr, workers = config.workers, "listener bound");

    Ok(BoundServer {
        server: server.run(),
        addrs,
    })
}

/// Binds and serves until shutdown.
pub async fn run<F>(
    config: &ServerConfig,
    runtime: InferenceRuntime,
    configure: F,
) -> Result<(), BootstrapError>
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    bind(config, runtime, configure)?.serve().await
}
