//! # Client Configuration
//!
//! The API base URL is picked once at startup from the hosting context and
//! never re-derived afterwards.

/// Port the reverse-proxied container deployment serves the page on
pub const PROXIED_PORT: &str = "5500";
/// Path the proxy forwards to the backend
pub const PROXIED_API_BASE: &str = "/api";
/// Backend address when the page is opened directly during development
pub const LOCAL_API_BASE: &str = "http://localhost:8000";

/// Build-time override, e.g. `INCIDENT_API_BASE=https://api.example trunk build`
const API_BASE_OVERRIDE: Option<&str> = option_env!("INCIDENT_API_BASE");

/// Front-end configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every backend path is appended to, without trailing slash
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve the configuration from `window.location`
    pub fn from_location() -> Self {
        let port = web_sys::window()
            .and_then(|w| w.location().port().ok())
            .unwrap_or_default();
        Self::resolve(API_BASE_OVERRIDE, &port)
    }

    /// Build-time override first, then the page's port
    #[must_use]
    pub fn resolve(override_base: Option<&str>, port: &str) -> Self {
        let base = match override_base.map(str::trim) {
            Some(base) if !base.is_empty() => base,
            _ if port == PROXIED_PORT => PROXIED_API_BASE,
            _ => LOCAL_API_BASE,
        };
        Self {
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a backend path such as `/reports?limit=200`
    #[must_use]
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}
