//! Session-and-resource client for the Fortnite backend services.
//!
//! Authenticates through the launcher's exchange-code flow, queries MCP
//! profile documents, tracks an in-memory inventory of owned items and
//! exposes derived views over them (V-Bucks balance, gift and purchase
//! history).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use fortnite_client::{ClientConfig, SessionClient};
//! # use fortnite_client::{CodeExchange, ExchangeCode};
//! # struct Launcher;
//! # #[async_trait::async_trait]
//! # impl CodeExchange for Launcher {
//! #     async fn exchange(&self) -> fortnite_client::Result<ExchangeCode> {
//! #         Ok(ExchangeCode { code: "code".into() })
//! #     }
//! # }
//!
//! # async fn example() -> fortnite_client::Result<()> {
//! let client = Arc::new(SessionClient::new(
//!     ClientConfig::new().with_waiting_room(false),
//!     Arc::new(Launcher),
//! )?);
//! client.init().await?;
//! println!("V-Bucks: {}", client.vbucks().await);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod communicator;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod inventory;
pub mod launcher;
pub mod profile;
pub mod session;
pub mod subgame;
pub mod views;
pub mod waiting_room;

pub use client::SessionClient;
pub use communicator::Communicator;
pub use config::ClientConfig;
pub use endpoints::Endpoints;
pub use error::{ClientError, Result};
pub use inventory::{Inventory, InventoryItem};
pub use launcher::{CodeExchange, ExchangeCode, TokenRefreshReceiver};
pub use profile::{McpResponse, Profile, ProfileChange, ProfileChangeType};
pub use session::Session;
pub use subgame::{SubGame, SubGameRuntime};
pub use views::{CreatorTag, Gift, Purchase};
pub use waiting_room::{WaitAdvice, WaitingRoom};
