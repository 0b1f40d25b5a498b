//! In-memory inventory of owned items, projected from `common_core`.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, Result};

/// Wire shape of one profile item entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileItemEntry {
    template_id: String,
    #[serde(default = "default_quantity")]
    quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

/// Wire shape of a purchase loot entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LootEntry {
    item_guid: String,
    item_type: String,
    #[serde(default = "default_quantity")]
    quantity: u64,
}

/// One owned virtual item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub id: String,
    pub template_id: String,
    pub quantity: u64,
}

impl InventoryItem {
    /// Build from a `common_core` item entry keyed by `id`.
    pub fn from_profile_entry(id: &str, entry: &serde_json::Value) -> Result<Self> {
        let parsed: ProfileItemEntry = serde_json::from_value(entry.clone())?;
        Ok(Self {
            id: id.to_string(),
            template_id: parsed.template_id,
            quantity: parsed.quantity,
        })
    }

    /// Build from a purchase loot-result entry.
    pub fn from_loot_entry(entry: &serde_json::Value) -> Result<Self> {
        let parsed: LootEntry = serde_json::from_value(entry.clone())?;
        Ok(Self {
            id: parsed.item_guid,
            template_id: parsed.item_type,
            quantity: parsed.quantity,
        })
    }

    /// Template class, the prefix before `:` (e.g. `Currency` in
    /// `Currency:MtxGiveaway`).
    pub fn template_class(&self) -> &str {
        self.template_id
            .split_once(':')
            .map(|(class, _)| class)
            .unwrap_or(&self.template_id)
    }
}

/// The client-lifetime collection of owned items. Process memory only.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole inventory from a profile items mapping.
    pub fn hydrate(items: &HashMap<String, serde_json::Value>) -> Result<Self> {
        let mut inventory = Self::new();
        for (id, entry) in items {
            match InventoryItem::from_profile_entry(id, entry) {
                Ok(item) => inventory.items.push(item),
                Err(err) => {
                    return Err(ClientError::InvalidResponse(format!(
                        "malformed inventory entry '{id}': {err}"
                    )))
                }
            }
        }
        debug!(count = inventory.items.len(), "inventory hydrated");
        Ok(inventory)
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = InventoryItem>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn find_by_id(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items whose template class matches (e.g. `Currency`).
    pub fn find_by_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a InventoryItem> {
        self.items
            .iter()
            .filter(move |item| item.template_class() == class)
    }
}
