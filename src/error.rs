//! Error types for the Fortnite client.

use thiserror::Error;

/// Primary error type for all client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Not authenticated: no active session")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    Login(String),

    #[error("Waiting room error: {0}")]
    WaitingRoom(String),

    #[error("Profile '{0}' has not been loaded")]
    ProfileNotLoaded(String),

    #[error("Unhandled profile change type: {0}")]
    UnhandledProfileChange(String),

    #[error("Communicator error: {0}")]
    Communicator(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client is shutting down")]
    Cancelled,
}

impl ClientError {
    /// Create an API error from a status code and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ClientError>;
