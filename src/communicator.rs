//! Real-time communicator collaborator contract.

use async_trait::async_trait;

use crate::error::Result;

/// Live session channel, connected with the current access token.
///
/// The protocol itself lives in a separate crate; the client only drives the
/// connect/disconnect lifecycle. On token refresh the client disconnects
/// before reconnecting so a stale channel is never leaked.
#[async_trait]
pub trait Communicator: Send + Sync {
    async fn connect(&self, access_token: &str) -> Result<()>;
    async fn disconnect(&self) -> Result<()>;
}
