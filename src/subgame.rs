//! Sub-game selection and handlers.

use std::sync::Arc;

use async_trait::async_trait;
use strum::{Display, EnumString};
use tracing::debug;

use crate::client::SessionClient;
use crate::error::Result;

/// The closed set of sub-games a session can run.
///
/// Parsing an unknown name fails (`SubGame::from_str`) before any handler is
/// built or any request goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum SubGame {
    #[strum(serialize = "SaveTheWorld", serialize = "stw")]
    SaveTheWorld,
    #[strum(serialize = "BattleRoyale", serialize = "br")]
    BattleRoyale,
    #[strum(serialize = "Creative")]
    Creative,
}

impl SubGame {
    /// MCP profile id backing this sub-game's state.
    pub fn profile_id(self) -> &'static str {
        match self {
            Self::SaveTheWorld => "campaign",
            Self::BattleRoyale => "athena",
            Self::Creative => "creative",
        }
    }
}

/// An initialized sub-game handler bound to a session.
#[async_trait]
pub trait SubGameRuntime: Send + Sync {
    fn kind(&self) -> SubGame;

    /// Prepare the handler. Called once by
    /// [`SessionClient::run_sub_game`](crate::SessionClient::run_sub_game).
    async fn init(&self) -> Result<()>;
}

pub struct SaveTheWorld {
    client: Arc<SessionClient>,
}

impl SaveTheWorld {
    pub fn new(client: Arc<SessionClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<SessionClient> {
        &self.client
    }
}

#[async_trait]
impl SubGameRuntime for SaveTheWorld {
    fn kind(&self) -> SubGame {
        SubGame::SaveTheWorld
    }

    async fn init(&self) -> Result<()> {
        debug!(profile_id = self.kind().profile_id(), "Save the World ready");
        Ok(())
    }
}

pub struct BattleRoyale {
    client: Arc<SessionClient>,
}

impl BattleRoyale {
    pub fn new(client: Arc<SessionClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<SessionClient> {
        &self.client
    }
}

#[async_trait]
impl SubGameRuntime for BattleRoyale {
    fn kind(&self) -> SubGame {
        SubGame::BattleRoyale
    }

    async fn init(&self) -> Result<()> {
        debug!(profile_id = self.kind().profile_id(), "Battle Royale ready");
        Ok(())
    }
}

pub struct Creative {
    client: Arc<SessionClient>,
}

impl Creative {
    pub fn new(client: Arc<SessionClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<SessionClient> {
        &self.client
    }
}

#[async_trait]
impl SubGameRuntime for Creative {
    fn kind(&self) -> SubGame {
        SubGame::Creative
    }

    async fn init(&self) -> Result<()> {
        debug!(profile_id = self.kind().profile_id(), "Creative ready");
        Ok(())
    }
}
