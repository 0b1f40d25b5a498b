//! Shared HTTP plumbing: client construction, auth headers, status mapping.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};

use crate::error::ClientError;

/// Build the dedicated reqwest client for a [`SessionClient`](crate::SessionClient).
///
/// Carries the game's user agent and the configured Accept-Language on every
/// request, matching what the launcher stack sends.
pub fn build_client(user_agent: &str, language: &str) -> Result<reqwest::Client, ClientError> {
    let mut headers = HeaderMap::new();
    if let Ok(val) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, val);
    }
    if let Ok(val) = HeaderValue::from_str(language) {
        headers.insert(ACCEPT_LANGUAGE, val);
    }
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .default_headers(headers)
        .build()
        .map_err(ClientError::Network)
}

/// Encode a `basic <credentials>` authorization value from a client id/secret
/// pair, as the token endpoint expects.
pub fn basic_auth_value(client_id: &str, secret: &str) -> String {
    format!("basic {}", BASE64.encode(format!("{client_id}:{secret}")))
}

/// Map a non-success HTTP status into a typed error.
pub fn status_to_error(status: u16, body: &str) -> ClientError {
    match status {
        401 | 403 => ClientError::Authentication(body.to_string()),
        _ => ClientError::api(status, body),
    }
}
