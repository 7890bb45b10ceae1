use actix_cors::Cors;
use serde::Serialize;

/// Path scope the policy is attached to. The middleware wraps the whole app.
pub const ALL_ROUTES: &str = "/*";

/// Frontend dev server origins (Vite on port 5173).
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

const ALLOWED_METHODS: [&str; 7] = ["GET", "HEAD", "POST", "OPTIONS", "PUT", "PATCH", "DELETE"];

/// Origin allowlist applied to every route of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsPolicy {
    path_pattern: &'static str,
    allowed_origins: Vec<String>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::new(DEV_ORIGINS)
    }
}

impl CorsPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path_pattern: ALL_ROUTES,
            allowed_origins: origins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn path_pattern(&self) -> &str {
        self.path_pattern
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Builds the actix-cors middleware. Credentials stay disabled and any
    /// request header is accepted; origins outside the list get no grant.
    pub fn middleware(&self) -> Cors {
        self.allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(ALLOWED_METHODS)
            .allow_any_header()
    }
}
