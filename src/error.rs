use std::io;

/// Startup-fatal failures. Anything that degrades instead (a missing
/// accelerator, a disallowed origin) is not represented here.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("listener terminated")]
    Serve(#[source] io::Error),
}
