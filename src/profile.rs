//! MCP profile documents and the QueryProfile response shapes.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumString};

/// A named server-owned profile document (`common_core`, `common_public`, ...).
///
/// Attributes stay opaque; typed views parse out of them on demand. The
/// document is only ever replaced wholesale by a full profile update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub stats: ProfileStats,
    #[serde(default)]
    pub items: HashMap<String, serde_json::Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// Response envelope of an MCP profile action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpResponse {
    pub profile_id: String,
    #[serde(default)]
    pub profile_changes: Vec<ProfileChange>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// One reported change inside an MCP response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChange {
    pub change_type: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl ProfileChange {
    pub fn kind(&self) -> ProfileChangeType {
        // Infallible: the strum default variant absorbs unknown strings.
        ProfileChangeType::from_str(&self.change_type)
            .unwrap_or_else(|_| ProfileChangeType::Other(self.change_type.clone()))
    }
}

/// Closed set of change types the client understands, with a catch-all for
/// everything the server may add.
#[derive(Debug, Clone, PartialEq, Eq, Display, EnumString)]
pub enum ProfileChangeType {
    #[strum(serialize = "fullProfileUpdate")]
    FullProfileUpdate,
    /// Any change type this client does not apply.
    #[strum(default)]
    Other(String),
}
