//! Backend endpoint URLs, overridable for testing.

const DEFAULT_WAITING_ROOM_URL: &str =
    "https://fortnitewaitingroom-public-service-prod.ol.epicgames.com/waitingroom/api/waitingroom";
const DEFAULT_BASIC_DATA_URL: &str =
    "https://fortnitecontent-website-prod07.ol.epicgames.com/content/api/pages/fortnite-game";
const DEFAULT_OAUTH_TOKEN_URL: &str =
    "https://account-public-service-prod03.ol.epicgames.com/account/api/oauth/token";
const DEFAULT_SESSION_KILL_URL: &str =
    "https://account-public-service-prod03.ol.epicgames.com/account/api/oauth/sessions/kill";
const DEFAULT_MCP_PROFILE_URL: &str =
    "https://fortnite-public-service-prod11.ol.epicgames.com/fortnite/api/game/v2/profile";
const DEFAULT_STORE_CATALOG_URL: &str =
    "https://fortnite-public-service-prod11.ol.epicgames.com/fortnite/api/storefront/v2/catalog";

/// Resolved endpoint set used by [`SessionClient`](crate::SessionClient).
///
/// Every URL can be overridden with the `with_*` builders, which is how the
/// integration tests point the client at a mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub waiting_room: String,
    pub basic_data: String,
    pub oauth_token: String,
    pub session_kill: String,
    pub mcp_profile: String,
    pub store_catalog: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            waiting_room: DEFAULT_WAITING_ROOM_URL.to_string(),
            basic_data: DEFAULT_BASIC_DATA_URL.to_string(),
            oauth_token: DEFAULT_OAUTH_TOKEN_URL.to_string(),
            session_kill: DEFAULT_SESSION_KILL_URL.to_string(),
            mcp_profile: DEFAULT_MCP_PROFILE_URL.to_string(),
            store_catalog: DEFAULT_STORE_CATALOG_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point every endpoint at `base`, preserving the path shape of the
    /// production URLs. Intended for mock servers.
    pub fn with_base_url(base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        Self {
            waiting_room: format!("{base}/waitingroom/api/waitingroom"),
            basic_data: format!("{base}/content/api/pages/fortnite-game"),
            oauth_token: format!("{base}/account/api/oauth/token"),
            session_kill: format!("{base}/account/api/oauth/sessions/kill"),
            mcp_profile: format!("{base}/fortnite/api/game/v2/profile"),
            store_catalog: format!("{base}/fortnite/api/storefront/v2/catalog"),
        }
    }

    pub fn with_waiting_room_url(mut self, url: impl Into<String>) -> Self {
        self.waiting_room = url.into();
        self
    }

    pub fn with_basic_data_url(mut self, url: impl Into<String>) -> Self {
        self.basic_data = url.into();
        self
    }

    pub fn with_oauth_token_url(mut self, url: impl Into<String>) -> Self {
        self.oauth_token = url.into();
        self
    }

    pub fn with_session_kill_url(mut self, url: impl Into<String>) -> Self {
        self.session_kill = url.into();
        self
    }

    pub fn with_mcp_profile_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_profile = url.into();
        self
    }

    pub fn with_store_catalog_url(mut self, url: impl Into<String>) -> Self {
        self.store_catalog = url.into();
        self
    }
}
