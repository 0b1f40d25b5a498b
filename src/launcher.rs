//! Launcher-side collaborators: exchange-code source and refresh events.

use async_trait::async_trait;

use crate::error::Result;

/// One-time exchange code handed out by the launcher account session.
#[derive(Debug, Clone)]
pub struct ExchangeCode {
    pub code: String,
}

/// Source of one-time exchange codes, normally the launcher auth stack.
#[async_trait]
pub trait CodeExchange: Send + Sync {
    /// Obtain a fresh exchange code for the game token exchange.
    async fn exchange(&self) -> Result<ExchangeCode>;
}

/// Channel used by the launcher to announce that its own access token was
/// refreshed; the client re-logs-in and reconnects its communicator on each
/// event.
pub type TokenRefreshReceiver = tokio::sync::broadcast::Receiver<()>;
