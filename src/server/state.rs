//! Server state and configuration.

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4173";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:4173")
    pub listen_addr: String,
    /// Zone used when a request carries no `tz` (e.g., "America/Santiago").
    /// `None` means the server's local zone.
    pub default_time_zone: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            default_time_zone: None,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Request zone if given, otherwise the configured default.
    pub fn time_zone(&self, requested: Option<&str>) -> Option<String> {
        requested
            .filter(|tz| !tz.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.default_time_zone.clone())
    }
}
