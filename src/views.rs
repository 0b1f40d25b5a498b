//! Typed read-only views derived from the `common_core` profile.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::inventory::InventoryItem;
use crate::profile::Profile;

/// The `common_core` stat attributes the derived views read.
///
/// Everything else in the attributes blob stays opaque.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CommonCoreAttributes {
    #[serde(default)]
    pub gift_history: Option<GiftHistoryWire>,
    #[serde(default)]
    pub allowed_to_send_gifts: bool,
    #[serde(default)]
    pub allowed_to_receive_gifts: bool,
    #[serde(default)]
    pub mtx_affiliate: Option<String>,
    #[serde(default)]
    pub mtx_affiliate_set_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mtx_purchase_history: Option<PurchaseHistoryWire>,
}

impl CommonCoreAttributes {
    pub fn parse(profile: &Profile) -> Result<Self> {
        serde_json::from_value(profile.stats.attributes.clone()).map_err(Into::into)
    }

    pub fn gift_history(&self) -> Result<&GiftHistoryWire> {
        self.gift_history.as_ref().ok_or_else(|| {
            ClientError::InvalidResponse("common_core is missing gift_history".into())
        })
    }

    pub fn purchase_history(&self) -> Result<&PurchaseHistoryWire> {
        self.mtx_purchase_history.as_ref().ok_or_else(|| {
            ClientError::InvalidResponse("common_core is missing mtx_purchase_history".into())
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GiftHistoryWire {
    #[serde(default)]
    pub gifts: Vec<GiftWire>,
    #[serde(default)]
    pub num_sent: u64,
    #[serde(default)]
    pub num_received: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GiftWire {
    pub offer_id: String,
    pub to_account_id: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchaseHistoryWire {
    #[serde(default)]
    pub refunds_used: u64,
    #[serde(default)]
    pub refund_credits: u64,
    #[serde(default)]
    pub purchases: Vec<PurchaseWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchaseWire {
    pub purchase_id: String,
    pub offer_id: String,
    pub purchase_date: DateTime<Utc>,
    #[serde(default)]
    pub refund_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fulfillments: Vec<serde_json::Value>,
    #[serde(default)]
    pub total_mtx_paid: u64,
    #[serde(default)]
    pub loot_result: Vec<serde_json::Value>,
}

/// One sent gift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gift {
    pub offer_id: String,
    pub to_account_id: String,
    pub time: DateTime<Utc>,
}

/// The creator tag currently applied to purchases, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorTag {
    pub name: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// One store purchase, with its loot projected as inventory items.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub purchase_id: String,
    pub offer_id: String,
    pub purchase_date: DateTime<Utc>,
    pub refund_date: Option<DateTime<Utc>>,
    pub is_refunded: bool,
    pub fulfillments: Vec<serde_json::Value>,
    pub paid: u64,
    pub loot_result: Vec<InventoryItem>,
}

impl Purchase {
    pub(crate) fn from_wire(wire: PurchaseWire) -> Result<Self> {
        let loot_result = wire
            .loot_result
            .iter()
            .map(InventoryItem::from_loot_entry)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            purchase_id: wire.purchase_id,
            offer_id: wire.offer_id,
            purchase_date: wire.purchase_date,
            is_refunded: wire.refund_date.is_some(),
            refund_date: wire.refund_date,
            fulfillments: wire.fulfillments,
            paid: wire.total_mtx_paid,
            loot_result,
        })
    }
}

impl From<&GiftWire> for Gift {
    fn from(wire: &GiftWire) -> Self {
        Self {
            offer_id: wire.offer_id.clone(),
            to_account_id: wire.to_account_id.clone(),
            time: wire.date,
        }
    }
}
