//! Auth session state produced by the token exchange.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Wire shape of the OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
    pub refresh_token: String,
    pub refresh_expires: u64,
    pub refresh_expires_at: DateTime<Utc>,
    pub account_id: String,
    pub client_id: String,
    #[serde(default)]
    pub internal_client: bool,
    #[serde(default)]
    pub client_service: String,
    /// Application identifier; the server calls this field `pp`.
    #[serde(rename = "pp", default)]
    pub app: Option<String>,
    #[serde(default)]
    pub in_app_id: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Fully populated auth session.
///
/// A session is either completely present or absent; it is replaced wholesale
/// on every successful exchange and never partially mutated.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
    pub refresh_token: String,
    pub refresh_expires: u64,
    pub refresh_expires_at: DateTime<Utc>,
    pub account_id: String,
    pub client_id: String,
    pub internal_client: bool,
    pub client_service: String,
    pub app: Option<String>,
    pub in_app_id: Option<String>,
    pub device_id: Option<String>,
}

impl Session {
    /// Authorization header value for authenticated requests,
    /// e.g. `bearer eg1~...`.
    pub fn auth_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Whether the access token has passed its expiry instant.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl From<OAuthTokenResponse> for Session {
    fn from(resp: OAuthTokenResponse) -> Self {
        Self {
            access_token: resp.access_token,
            expires_in: resp.expires_in,
            expires_at: resp.expires_at,
            token_type: resp.token_type,
            refresh_token: resp.refresh_token,
            refresh_expires: resp.refresh_expires,
            refresh_expires_at: resp.refresh_expires_at,
            account_id: resp.account_id,
            client_id: resp.client_id,
            internal_client: resp.internal_client,
            client_service: resp.client_service,
            app: resp.app,
            in_app_id: resp.in_app_id,
            device_id: resp.device_id,
        }
    }
}
