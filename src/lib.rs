pub mod config;
pub mod cors;
pub mod device;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod server;
