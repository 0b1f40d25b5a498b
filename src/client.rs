//! The stateful session facade over the backend services.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::communicator::Communicator;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::http::{basic_auth_value, build_client, status_to_error};
use crate::inventory::Inventory;
use crate::launcher::{CodeExchange, TokenRefreshReceiver};
use crate::profile::{McpResponse, Profile, ProfileChangeType};
use crate::session::{OAuthTokenResponse, Session};
use crate::subgame::{BattleRoyale, Creative, SaveTheWorld, SubGame, SubGameRuntime};
use crate::views::{CommonCoreAttributes, CreatorTag, Gift, Purchase};
use crate::waiting_room::WaitingRoom;

/// Game client credentials for the token exchange.
const DEFAULT_CLIENT_ID: &str = "ec684b8c687f479fadea3cb2ad83f5c6";
const DEFAULT_CLIENT_SECRET: &str = "e1f31c211f28413186262d37a13fc84d";

const KILL_TYPE: &str = "OTHERS_ACCOUNT_CLIENT_SERVICE";

/// Session-and-resource client for the game backend.
///
/// Composes the waiting-room gate, the token exchange, the MCP profile
/// endpoints and an optional live communicator behind one stateful facade.
/// All auth state lives in a single cell replaced wholesale under a login
/// mutex, so a refresh event can never corrupt a session mid-use.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use fortnite_client::{ClientConfig, SessionClient};
/// # use fortnite_client::{CodeExchange, ExchangeCode};
/// # struct Launcher;
/// # #[async_trait::async_trait]
/// # impl CodeExchange for Launcher {
/// #     async fn exchange(&self) -> fortnite_client::Result<ExchangeCode> {
/// #         Ok(ExchangeCode { code: "code".into() })
/// #     }
/// # }
///
/// # async fn example() -> fortnite_client::Result<()> {
/// let client = Arc::new(SessionClient::new(ClientConfig::from_env(), Arc::new(Launcher))?);
/// client.init().await?;
/// println!("balance: {}", client.vbucks().await);
/// # Ok(())
/// # }
/// ```
pub struct SessionClient {
    config: ClientConfig,
    http: reqwest::Client,
    exchange: Arc<dyn CodeExchange>,
    communicator: Option<Arc<dyn Communicator>>,
    language: std::sync::RwLock<String>,
    session: RwLock<Option<Session>>,
    login_lock: Mutex<()>,
    profiles: RwLock<HashMap<String, Profile>>,
    inventory: RwLock<Inventory>,
    basic_data: RwLock<Option<serde_json::Value>>,
    store_catalog: RwLock<Option<serde_json::Value>>,
    cancel: CancellationToken,
}

impl SessionClient {
    pub fn new(config: ClientConfig, exchange: Arc<dyn CodeExchange>) -> Result<Self> {
        let http = build_client(&config.user_agent(), &config.language)?;
        let language = std::sync::RwLock::new(config.language.clone());
        Ok(Self {
            config,
            http,
            exchange,
            communicator: None,
            language,
            session: RwLock::new(None),
            login_lock: Mutex::new(()),
            profiles: RwLock::new(HashMap::new()),
            inventory: RwLock::new(Inventory::new()),
            basic_data: RwLock::new(None),
            store_catalog: RwLock::new(None),
            cancel: CancellationToken::new(),
        })
    }

    /// Attach a live communicator; it is connected at the end of `init` and
    /// reconnected on every token refresh.
    pub fn with_communicator(mut self, communicator: Arc<dyn Communicator>) -> Self {
        self.communicator = Some(communicator);
        self
    }

    /// Change the Accept-Language used on subsequent requests.
    pub fn set_language(&self, language: impl Into<String>) {
        if let Ok(mut current) = self.language.write() {
            *current = language.into();
        }
    }

    fn language(&self) -> String {
        self.language
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|_| self.config.language.clone())
    }

    /// Cancel pending waiting-room retries and the refresh listener.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    // -----------------------------------------------------------------------
    // Initialization
    // -----------------------------------------------------------------------

    /// Run the full initialization sequence: waiting-room gate, basic data,
    /// login, `common_public` + `common_core` profiles, inventory hydration
    /// and the optional communicator connect.
    ///
    /// Waiting-room advice is honored in-place: the client sleeps for the
    /// advised number of seconds and re-checks the gate, without re-running
    /// any later step. The sleep aborts if [`shutdown`](Self::shutdown) is
    /// called.
    pub async fn init(&self) -> Result<bool> {
        match self.init_inner().await {
            Ok(login) => Ok(login),
            Err(err) => {
                warn!(error = %err, "client initialization failed");
                Err(err)
            }
        }
    }

    async fn init_inner(&self) -> Result<bool> {
        if self.config.use_waiting_room {
            self.pass_waiting_room().await?;
        }

        self.refresh_basic_data().await?;

        let login = self.login(false).await?;

        self.update_profile("common_public", None, None).await?;
        self.update_profile("common_core", None, None).await?;

        self.hydrate_inventory().await?;

        if let Some(communicator) = &self.communicator {
            let session = self.session().await.ok_or(ClientError::NotAuthenticated)?;
            communicator.connect(&session.access_token).await?;
        }

        Ok(login)
    }

    async fn pass_waiting_room(&self) -> Result<()> {
        let gate = WaitingRoom::new(
            self.http.clone(),
            self.config.endpoints.waiting_room.as_str(),
        );
        while let Some(advice) = gate.need_wait().await? {
            warn!(
                seconds = advice.expected_wait,
                "problems with servers, waiting before reconnecting"
            );
            tokio::select! {
                _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(Duration::from_secs(advice.expected_wait)) => {}
            }
        }
        Ok(())
    }

    async fn hydrate_inventory(&self) -> Result<()> {
        let items = {
            let profiles = self.profiles.read().await;
            let core = profiles
                .get("common_core")
                .ok_or_else(|| ClientError::ProfileNotLoaded("common_core".to_string()))?;
            core.items.clone()
        };
        let inventory = Inventory::hydrate(&items)?;
        *self.inventory.write().await = inventory;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    /// Exchange a one-time launcher code for a game access/refresh token pair.
    ///
    /// On a first login (`is_refresh == false`) every other active session
    /// for the account is killed. The store catalog is refreshed afterwards
    /// in both modes; a catalog failure is logged but does not fail the login.
    pub async fn login(&self, is_refresh: bool) -> Result<bool> {
        let _guard = self.login_lock.lock().await;

        debug!(refresh = is_refresh, "exchanging access token");

        let code = self.exchange.exchange().await?;
        if code.code.is_empty() {
            return Err(ClientError::Login("empty exchange code".to_string()));
        }

        let resp = self
            .http
            .post(&self.config.endpoints.oauth_token)
            .header(
                AUTHORIZATION,
                basic_auth_value(DEFAULT_CLIENT_ID, DEFAULT_CLIENT_SECRET),
            )
            .header(ACCEPT_LANGUAGE, self.language())
            .form(&[
                ("grant_type", "exchange_code"),
                ("exchange_code", code.code.as_str()),
                ("includePerms", "false"),
                ("token_type", "eg1"),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }

        let token: OAuthTokenResponse = resp.json().await?;
        let session = Session::from(token);
        let auth_header = session.auth_header();

        *self.session.write().await = Some(session);
        debug!(refresh = is_refresh, "access token exchanged");

        if !is_refresh {
            self.kill_other_sessions(&auth_header).await?;
        }

        if let Err(err) = self.refresh_store_catalog().await {
            warn!(error = %err, "store catalog refresh failed after login");
        }

        Ok(true)
    }

    async fn kill_other_sessions(&self, auth_header: &str) -> Result<()> {
        let resp = self
            .http
            .delete(&self.config.endpoints.session_kill)
            .query(&[("killType", KILL_TYPE)])
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        debug!("other account sessions killed");
        Ok(())
    }

    /// Re-login in refresh mode and cycle the communicator connection.
    /// Disconnect happens before reconnect so a stale channel never leaks.
    pub async fn handle_access_token_refreshed(&self) -> Result<()> {
        self.login(true).await?;
        if let Some(communicator) = &self.communicator {
            communicator.disconnect().await?;
            let session = self.session().await.ok_or(ClientError::NotAuthenticated)?;
            communicator.connect(&session.access_token).await?;
        }
        Ok(())
    }

    /// Subscribe to the launcher's token-refresh events. The task runs
    /// [`handle_access_token_refreshed`](Self::handle_access_token_refreshed)
    /// per event and exits when the client shuts down or the sender drops.
    pub fn spawn_refresh_listener(
        self: Arc<Self>,
        mut events: TokenRefreshReceiver,
    ) -> tokio::task::JoinHandle<()> {
        let client = self;
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = client.cancel.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(()) => {
                            if let Err(err) = client.handle_access_token_refreshed().await {
                                warn!(error = %err, "token refresh handling failed");
                            }
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                            debug!(skipped, "refresh events lagged");
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        })
    }

    // -----------------------------------------------------------------------
    // MCP
    // -----------------------------------------------------------------------

    /// Generic authenticated MCP action. `rvn` defaults to `-1` (unknown
    /// revision); lean responses are always requested.
    pub async fn request_mcp(
        &self,
        action: &str,
        profile_id: &str,
        payload: Option<serde_json::Value>,
        rvn: Option<i64>,
    ) -> Result<McpResponse> {
        let session = self.session().await.ok_or(ClientError::NotAuthenticated)?;
        let url = format!(
            "{}/{}/client/{}",
            self.config.endpoints.mcp_profile, session.account_id, action
        );
        let rvn = rvn.unwrap_or(-1).to_string();
        let resp = self
            .http
            .post(&url)
            .query(&[
                ("profileId", profile_id),
                ("rvn", rvn.as_str()),
                ("leanResponse", "true"),
            ])
            .header(AUTHORIZATION, session.auth_header())
            .header(ACCEPT_LANGUAGE, self.language())
            .json(&payload.unwrap_or_else(|| serde_json::json!({})))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        Ok(resp.json().await?)
    }

    /// Query a profile and apply the first reported change. Only a full
    /// profile update replaces the stored document; any other change type
    /// leaves it untouched and surfaces as
    /// [`ClientError::UnhandledProfileChange`].
    pub async fn update_profile(
        &self,
        profile_id: &str,
        payload: Option<serde_json::Value>,
        rvn: Option<i64>,
    ) -> Result<()> {
        let data = self
            .request_mcp("QueryProfile", profile_id, payload, rvn)
            .await?;
        let change = data.profile_changes.first().ok_or_else(|| {
            ClientError::InvalidResponse(format!("no profile changes for '{}'", data.profile_id))
        })?;

        match change.kind() {
            ProfileChangeType::FullProfileUpdate => {
                let profile = change.profile.clone().ok_or_else(|| {
                    ClientError::InvalidResponse(
                        "full profile update without a profile body".to_string(),
                    )
                })?;
                self.profiles
                    .write()
                    .await
                    .insert(data.profile_id.clone(), profile);
                Ok(())
            }
            ProfileChangeType::Other(change_type) => {
                debug!(%change_type, profile_id = %data.profile_id, "unhandled profile change type");
                Err(ClientError::UnhandledProfileChange(change_type))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Sub-games
    // -----------------------------------------------------------------------

    /// Build and initialize the handler for one of the sub-games.
    pub async fn run_sub_game(self: Arc<Self>, kind: SubGame) -> Result<Box<dyn SubGameRuntime>> {
        let game: Box<dyn SubGameRuntime> = match kind {
            SubGame::SaveTheWorld => Box::new(SaveTheWorld::new(self)),
            SubGame::BattleRoyale => Box::new(BattleRoyale::new(self)),
            SubGame::Creative => Box::new(Creative::new(self)),
        };
        game.init().await?;
        Ok(game)
    }

    // -----------------------------------------------------------------------
    // Cached payload refreshes
    // -----------------------------------------------------------------------

    /// Refetch the basic metadata document and replace the cached copy.
    pub async fn refresh_basic_data(&self) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(&self.config.endpoints.basic_data)
            .header(ACCEPT_LANGUAGE, self.language())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        let data: serde_json::Value = resp.json().await?;
        *self.basic_data.write().await = Some(data.clone());
        Ok(data)
    }

    /// Refetch the store catalog (authenticated) and replace the cached copy.
    pub async fn refresh_store_catalog(&self) -> Result<()> {
        let session = self.session().await.ok_or(ClientError::NotAuthenticated)?;
        let resp = self
            .http
            .get(&self.config.endpoints.store_catalog)
            .header(AUTHORIZATION, session.auth_header())
            .header(ACCEPT_LANGUAGE, self.language())
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body));
        }
        let data: serde_json::Value = resp.json().await?;
        *self.store_catalog.write().await = Some(data);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Snapshot of the current session, if logged in.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn account_id(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.account_id.clone())
    }

    /// Snapshot of a stored profile document.
    pub async fn profile(&self, profile_id: &str) -> Option<Profile> {
        self.profiles.read().await.get(profile_id).cloned()
    }

    /// Snapshot of the current inventory.
    pub async fn inventory(&self) -> Inventory {
        self.inventory.read().await.clone()
    }

    pub async fn basic_data(&self) -> Option<serde_json::Value> {
        self.basic_data.read().await.clone()
    }

    pub async fn store_catalog(&self) -> Option<serde_json::Value> {
        self.store_catalog.read().await.clone()
    }

    // -----------------------------------------------------------------------
    // Derived views over common_core
    // -----------------------------------------------------------------------

    async fn common_core(&self) -> Result<CommonCoreAttributes> {
        let profiles = self.profiles.read().await;
        let core = profiles
            .get("common_core")
            .ok_or_else(|| ClientError::ProfileNotLoaded("common_core".to_string()))?;
        CommonCoreAttributes::parse(core)
    }

    /// Total V-Bucks balance: complimentary + giveaway currency quantities.
    /// Other currency templates are ignored and logged.
    pub async fn vbucks(&self) -> u64 {
        let inventory = self.inventory.read().await;
        let mut sum = 0;
        for currency in inventory.find_by_class("Currency") {
            match currency.template_id.as_str() {
                "Currency:MtxComplimentary" | "Currency:MtxGiveaway" => {
                    sum += currency.quantity;
                }
                other => {
                    debug!(template_id = other, "unknown currency template");
                }
            }
        }
        sum
    }

    pub async fn gifts_history(&self) -> Result<Vec<Gift>> {
        let attrs = self.common_core().await?;
        Ok(attrs.gift_history()?.gifts.iter().map(Gift::from).collect())
    }

    pub async fn count_of_sent_gifts(&self) -> Result<u64> {
        Ok(self.common_core().await?.gift_history()?.num_sent)
    }

    pub async fn count_of_received_gifts(&self) -> Result<u64> {
        Ok(self.common_core().await?.gift_history()?.num_received)
    }

    pub async fn can_send_gifts(&self) -> Result<bool> {
        Ok(self.common_core().await?.allowed_to_send_gifts)
    }

    pub async fn can_receive_gifts(&self) -> Result<bool> {
        Ok(self.common_core().await?.allowed_to_receive_gifts)
    }

    /// The creator tag applied to purchases, if one is set.
    pub async fn used_creator_tag(&self) -> Result<Option<CreatorTag>> {
        let attrs = self.common_core().await?;
        Ok(attrs
            .mtx_affiliate
            .filter(|name| !name.is_empty())
            .map(|name| CreatorTag {
                name,
                last_modified: attrs.mtx_affiliate_set_time,
            }))
    }

    pub async fn count_used_refunds(&self) -> Result<u64> {
        Ok(self.common_core().await?.purchase_history()?.refunds_used)
    }

    pub async fn count_possible_refunds(&self) -> Result<u64> {
        Ok(self.common_core().await?.purchase_history()?.refund_credits)
    }

    pub async fn purchases_history(&self) -> Result<Vec<Purchase>> {
        let attrs = self.common_core().await?;
        attrs
            .purchase_history()?
            .purchases
            .iter()
            .cloned()
            .map(Purchase::from_wire)
            .collect()
    }
}

impl Drop for SessionClient {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
