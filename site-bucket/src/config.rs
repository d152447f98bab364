use tracing::{debug, info};

/// Environment variable overriding the storage endpoint, for local
/// S3-compatible deployments.
pub const ENDPOINT_URL_VAR: &str = "S3_ENDPOINT_URL";

/// Session-wide settings resolved once at startup, before any client exists.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Named credentials profile; `None` uses the default provider chain.
    pub profile: Option<String>,
    /// Endpoint override; `None` targets the real cloud endpoints.
    pub endpoint_url: Option<String>,
}

impl SessionConfig {
    /// Build the session from CLI arguments plus the process environment.
    pub fn from_cli(profile: Option<String>) -> Self {
        Self {
            profile,
            endpoint_url: std::env::var(ENDPOINT_URL_VAR).ok(),
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            profile = self.profile.as_deref().unwrap_or("default"),
            endpoint_override = self.endpoint_url.is_some(),
            "Loaded SessionConfig"
        );
        debug!(?self, "SessionConfig loaded (full debug)");
    }
}
