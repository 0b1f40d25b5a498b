//! Client configuration (layered: code > env > defaults).

use crate::endpoints::Endpoints;

/// Game build identity reported to the backend.
pub const APP_NAME: &str = "Fortnite";
/// "Engine Version:" in FortniteGame.log.
pub const ENGINE_VERSION: &str = "4.22.0-5046157+++Fortnite+Release-7.40";
/// "Net CL:" in FortniteGame.log.
pub const BUILD_ID: u64 = 4774386;

/// Configuration for a [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Check the waiting-room gate before connecting.
    pub use_waiting_room: bool,
    /// Accept-Language sent on every request.
    pub language: String,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            use_waiting_room: true,
            language: "en-US".to_string(),
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer environment variables over the defaults
    /// (`FORTNITE_USE_WAITING_ROOM`, `FORTNITE_LANGUAGE`, `FORTNITE_BASE_URL`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        if let Ok(value) = std::env::var("FORTNITE_USE_WAITING_ROOM") {
            config.use_waiting_room = parse_bool(&value).unwrap_or(config.use_waiting_room);
        }
        if let Ok(language) = std::env::var("FORTNITE_LANGUAGE") {
            if !language.is_empty() {
                config.language = language;
            }
        }
        if let Ok(base) = std::env::var("FORTNITE_BASE_URL") {
            if !base.is_empty() {
                config.endpoints = Endpoints::with_base_url(base);
            }
        }

        config
    }

    pub fn with_waiting_room(mut self, enabled: bool) -> Self {
        self.use_waiting_room = enabled;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// User agent the dedicated HTTP client identifies as.
    pub fn user_agent(&self) -> String {
        format!("{APP_NAME}/{ENGINE_VERSION} build/{BUILD_ID}")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
