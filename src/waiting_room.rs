//! Waiting-room capacity gate checked before connecting.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Advice returned when the service is under load.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitAdvice {
    /// Seconds to wait before re-checking.
    pub expected_wait: u64,
    #[serde(default)]
    pub retry_time: Option<u64>,
}

/// Client for the waiting-room pre-check endpoint.
pub struct WaitingRoom {
    http: reqwest::Client,
    url: String,
}

impl WaitingRoom {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Ask the gate whether we must wait. `None` means connect now.
    pub async fn need_wait(&self) -> Result<Option<WaitAdvice>> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ClientError::WaitingRoom(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::WaitingRoom(format!(
                "gate returned status {status}: {body}"
            )));
        }

        let body = resp.text().await.unwrap_or_default();
        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str::<WaitAdvice>(&body) {
            Ok(advice) if advice.expected_wait > 0 => {
                debug!(expected_wait = advice.expected_wait, "waiting room advised a wait");
                Ok(Some(advice))
            }
            Ok(_) => Ok(None),
            Err(err) => Err(ClientError::WaitingRoom(format!(
                "unreadable gate response: {err}"
            ))),
        }
    }
}
