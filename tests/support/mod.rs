#![allow(dead_code)]
//! Shared test helpers: canned payloads, collaborators, standard mocks.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fortnite_client::{
    ClientConfig, CodeExchange, Communicator, Endpoints, ExchangeCode, Result, SessionClient,
};

pub const ACCOUNT_ID: &str = "acct-1";

/// Exchange-code source returning a fixed code.
pub struct StaticExchange {
    pub code: &'static str,
}

impl StaticExchange {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self { code: "exchange-code-1" })
    }
}

#[async_trait]
impl CodeExchange for StaticExchange {
    async fn exchange(&self) -> Result<ExchangeCode> {
        Ok(ExchangeCode {
            code: self.code.to_string(),
        })
    }
}

/// Communicator that records the order of connect/disconnect calls.
#[derive(Default)]
pub struct RecordingCommunicator {
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl Communicator for RecordingCommunicator {
    async fn connect(&self, access_token: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("connect:{access_token}"));
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.calls.lock().unwrap().push("disconnect".to_string());
        Ok(())
    }
}

pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new()
        .with_waiting_room(false)
        .with_endpoints(Endpoints::with_base_url(server.uri()))
}

pub fn test_client(server: &MockServer) -> Arc<SessionClient> {
    Arc::new(SessionClient::new(test_config(server), StaticExchange::ok()).unwrap())
}

pub fn token_response(access_token: &str) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "expires_in": 28800,
        "expires_at": "2026-12-01T08:00:00.000Z",
        "token_type": "bearer",
        "refresh_token": "refresh-1",
        "refresh_expires": 86400,
        "refresh_expires_at": "2026-12-02T00:00:00.000Z",
        "account_id": ACCOUNT_ID,
        "client_id": "client-1",
        "internal_client": true,
        "client_service": "fortnite",
        "pp": "prod",
        "in_app_id": ACCOUNT_ID,
        "device_id": "device-1"
    })
}

/// `common_core` with 600 + 400 V-Bucks, one unknown currency and one token
/// item; vbucks over this profile must equal 1000.
pub fn common_core_items() -> serde_json::Value {
    json!({
        "vbucks-giveaway": { "templateId": "Currency:MtxGiveaway", "quantity": 600 },
        "vbucks-comp": { "templateId": "Currency:MtxComplimentary", "quantity": 400 },
        "vbucks-purchased": { "templateId": "Currency:MtxPurchased", "quantity": 9999 },
        "campaign-access": { "templateId": "Token:campaignaccess", "quantity": 1 }
    })
}

pub fn common_core_attributes() -> serde_json::Value {
    json!({
        "gift_history": {
            "num_sent": 2,
            "num_received": 5,
            "gifts": [{
                "offerId": "offer-1",
                "toAccountId": "friend-1",
                "date": "2026-02-03T10:00:00.000Z"
            }]
        },
        "allowed_to_send_gifts": true,
        "allowed_to_receive_gifts": true,
        "mtx_affiliate": "SomeCreator",
        "mtx_affiliate_set_time": "2026-01-15T12:00:00.000Z",
        "mtx_purchase_history": {
            "refundsUsed": 1,
            "refundCredits": 2,
            "purchases": [{
                "purchaseId": "purchase-1",
                "offerId": "offer-2",
                "purchaseDate": "2026-02-01T00:00:00.000Z",
                "fulfillments": [],
                "totalMtxPaid": 800,
                "lootResult": [{
                    "itemGuid": "loot-1",
                    "itemType": "AthenaDance:eid_floss",
                    "quantity": 1
                }]
            }]
        }
    })
}

pub fn full_profile_update(profile_id: &str, profile: serde_json::Value) -> serde_json::Value {
    json!({
        "profileId": profile_id,
        "profileChanges": [{
            "changeType": "fullProfileUpdate",
            "profile": profile
        }]
    })
}

pub fn common_core_response() -> serde_json::Value {
    full_profile_update(
        "common_core",
        json!({
            "stats": { "attributes": common_core_attributes() },
            "items": common_core_items()
        }),
    )
}

pub fn common_public_response() -> serde_json::Value {
    full_profile_update(
        "common_public",
        json!({
            "stats": { "attributes": { "banner_color": "defaultcolor1" } },
            "items": {}
        }),
    )
}

pub fn basic_data() -> serde_json::Value {
    json!({ "battleroyalenews": { "news": { "messages": [] } }, "lastModified": "2026-08-01T00:00:00.000Z" })
}

pub fn store_catalog() -> serde_json::Value {
    json!({ "refreshIntervalHrs": 24, "storefronts": [] })
}

/// Mount the happy-path mocks for a full `init()` sequence.
pub async fn mount_init_mocks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/content/api/pages/fortnite-game"))
        .respond_with(ResponseTemplate::new(200).set_body_json(basic_data()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/account/api/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response("eg1~access-1")))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/account/api/oauth/sessions/kill"))
        .and(query_param("killType", "OTHERS_ACCOUNT_CLIENT_SERVICE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fortnite/api/storefront/v2/catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(store_catalog()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/fortnite/api/game/v2/profile/{ACCOUNT_ID}/client/QueryProfile"
        )))
        .and(query_param("profileId", "common_public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common_public_response()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!(
            "/fortnite/api/game/v2/profile/{ACCOUNT_ID}/client/QueryProfile"
        )))
        .and(query_param("profileId", "common_core"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common_core_response()))
        .mount(server)
        .await;
}
