//! Wallet adapter bound to the SettleX test networks
//!
//! This is the connection surface the settlement front ends build on: a
//! fixed set of testnets with Base Sepolia as the default, wallet metadata
//! shown in connection prompts, and a persisted session recording the
//! connected account and active chain. Construction is gated on the wallet
//! project identifier; without it nothing is built.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    presets, HttpClientConfig, ManagedProvider, NetworkProfile, ProviderError, ProviderPool,
    RateLimitConfig, Result, RpcClient,
};

/// Environment variable carrying the wallet project identifier
pub const PROJECT_ID_ENV: &str = "SETTLEX_PROJECT_ID";

/// Application metadata shown in wallet connection prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Application URL
    pub url: String,
    /// Icon URL
    pub icon: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "SettleX".to_string(),
            description: "The Settlement Layer for Stablecoins".to_string(),
            url: "https://settlex.fi".to_string(),
            icon: "https://assets.reown.com/reown-profile-pic.png".to_string(),
        }
    }
}

/// Wallet modal theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    /// Dark theme (the SettleX default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

/// Returns the networks the wallet adapter supports
///
/// Base Sepolia comes first and is the default network.
pub fn default_networks() -> Vec<NetworkProfile> {
    vec![
        presets::base_sepolia(),
        presets::arbitrum_sepolia(),
        presets::avalanche_fuji(),
        presets::scroll_sepolia(),
        presets::optimism_sepolia(),
        presets::monad_testnet(),
        presets::zksync_sepolia(),
    ]
}

/// Configuration for the wallet adapter
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Wallet project identifier
    pub project_id: String,
    /// Application metadata
    pub metadata: AppMetadata,
    /// Wallet modal theme
    pub theme: ThemeMode,
    /// Supported networks, first entry is the default
    pub networks: Vec<NetworkProfile>,
    /// Optional path for session persistence
    pub session_path: Option<PathBuf>,
}

impl AdapterConfig {
    /// Creates a configuration with the given project id and the default
    /// networks, metadata, and theme
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            metadata: AppMetadata::default(),
            theme: ThemeMode::default(),
            networks: default_networks(),
            session_path: None,
        }
    }

    /// Reads the project id from the environment
    ///
    /// Fails with [`ProviderError::MissingProjectId`] when the variable is
    /// unset or empty. This check runs before anything else is constructed.
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var(PROJECT_ID_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ProviderError::MissingProjectId(PROJECT_ID_ENV))?;
        Ok(Self::new(project_id))
    }

    /// Sets the application metadata
    pub fn with_metadata(mut self, metadata: AppMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the wallet modal theme
    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the networks, first entry becomes the default
    pub fn with_networks(mut self, networks: Vec<NetworkProfile>) -> Self {
        self.networks = networks;
        self
    }

    /// Enables session persistence at the given path
    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = Some(path.into());
        self
    }

    /// Validates the configuration
    ///
    /// Each network must validate on its own, and no two networks may claim
    /// the same chain id, since providers are keyed by it.
    pub fn validate(&self) -> Result<()> {
        if self.project_id.trim().is_empty() {
            return Err(ProviderError::MissingProjectId(PROJECT_ID_ENV));
        }
        if self.networks.is_empty() {
            return Err(ProviderError::NoNetworks);
        }
        let mut seen = HashSet::new();
        for network in &self.networks {
            network.validate()?;
            if !seen.insert(network.chain_id) {
                return Err(ProviderError::InvalidConfig(format!(
                    "duplicate network for chain id {}",
                    network.chain_id
                )));
            }
        }
        Ok(())
    }
}

/// Wallet connection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Connected account, if any
    #[serde(default)]
    pub account: Option<String>,
    /// Active chain id
    pub chain_id: u64,
}

/// Persists the wallet session across restarts
///
/// The front end keeps this state in cookies so a reload restores the
/// connected account and chain. Here it is a JSON file next to the rest of
/// the application state, or purely in memory when no path is configured.
#[derive(Debug)]
pub struct SessionManager {
    path: Option<PathBuf>,
    session: RwLock<WalletSession>,
}

impl SessionManager {
    /// Creates an in-memory session manager
    pub fn in_memory(initial: WalletSession) -> Self {
        Self {
            path: None,
            session: RwLock::new(initial),
        }
    }

    /// Creates a file-backed session manager
    ///
    /// Loads the session from `path` if it exists and parses, otherwise
    /// starts from `fallback`.
    pub fn with_file(path: PathBuf, fallback: WalletSession) -> Self {
        let session = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or(fallback),
            Err(_) => fallback,
        };
        Self {
            path: Some(path),
            session: RwLock::new(session),
        }
    }

    /// Returns a snapshot of the current session
    pub async fn current(&self) -> WalletSession {
        self.session.read().await.clone()
    }

    /// Records a connected account
    pub async fn connect(&self, account: impl Into<String>) -> Result<()> {
        let mut session = self.session.write().await;
        session.account = Some(account.into());
        self.persist(&session).await
    }

    /// Clears the connected account
    pub async fn disconnect(&self) -> Result<()> {
        let mut session = self.session.write().await;
        session.account = None;
        self.persist(&session).await
    }

    /// Switches the active chain
    pub async fn switch_chain(&self, chain_id: u64) -> Result<()> {
        let mut session = self.session.write().await;
        session.chain_id = chain_id;
        self.persist(&session).await
    }

    async fn persist(&self, session: &WalletSession) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let json = serde_json::to_string_pretty(session)?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

/// Wallet adapter over the SettleX test networks
///
/// Owns a provider pool with one managed provider per network, a shared
/// rate-limited RPC client, and the wallet session. RPC calls go to the
/// provider of the requested chain, which handles endpoint rotation and
/// retries.
#[derive(Debug)]
pub struct WalletAdapter {
    config: AdapterConfig,
    default_network: NetworkProfile,
    providers: ProviderPool,
    client: RpcClient,
    session: SessionManager,
}

impl WalletAdapter {
    /// Builds an adapter from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(AdapterConfig::from_env()?)
    }

    /// Builds an adapter from an explicit configuration
    ///
    /// The project id gate runs first: no provider is constructed when the
    /// id is missing.
    pub fn new(config: AdapterConfig) -> Result<Self> {
        config.validate()?;

        let default_network = config
            .networks
            .first()
            .cloned()
            .ok_or(ProviderError::NoNetworks)?;

        let providers = ProviderPool::new();
        for network in &config.networks {
            providers.add(network.clone())?;
        }

        // One client for all networks; the rate ceiling covers their
        // combined traffic
        let client =
            RpcClient::with_config(HttpClientConfig::default(), Some(RateLimitConfig::default()))?;

        let initial = WalletSession {
            account: None,
            chain_id: default_network.chain_id,
        };
        let session = match &config.session_path {
            Some(path) => SessionManager::with_file(path.clone(), initial),
            None => SessionManager::in_memory(initial),
        };

        tracing::info!(
            "Wallet adapter ready: {} networks, default {}",
            config.networks.len(),
            default_network.name
        );

        Ok(Self {
            config,
            default_network,
            providers,
            client,
            session,
        })
    }

    /// Returns the wallet project identifier
    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Returns the application metadata
    pub fn metadata(&self) -> &AppMetadata {
        &self.config.metadata
    }

    /// Returns the wallet modal theme
    pub fn theme(&self) -> ThemeMode {
        self.config.theme
    }

    /// Returns the supported networks
    pub fn networks(&self) -> &[NetworkProfile] {
        &self.config.networks
    }

    /// Returns the default network (the first configured one)
    pub fn default_network(&self) -> &NetworkProfile {
        &self.default_network
    }

    /// Looks up a network by chain id
    pub fn network_by_chain_id(&self, chain_id: u64) -> Option<&NetworkProfile> {
        self.config.networks.iter().find(|n| n.chain_id == chain_id)
    }

    /// Returns the network the session currently points at
    ///
    /// Falls back to the default network when the session references a chain
    /// that is no longer configured.
    pub async fn active_network(&self) -> &NetworkProfile {
        let chain_id = self.session.current().await.chain_id;
        self.network_by_chain_id(chain_id)
            .unwrap_or(&self.default_network)
    }

    /// Returns the managed provider for a chain id
    pub fn provider_for(&self, chain_id: u64) -> Result<Arc<ManagedProvider>> {
        self.providers.get(chain_id)
    }

    /// Returns the provider pool
    pub fn providers(&self) -> &ProviderPool {
        &self.providers
    }

    /// Returns the session manager
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Switches the session to another configured network
    pub async fn switch_network(&self, chain_id: u64) -> Result<()> {
        if !self.providers.contains(chain_id) {
            return Err(ProviderError::UnknownChain(chain_id));
        }
        self.session.switch_chain(chain_id).await
    }

    /// Makes a JSON-RPC call on the given chain with automatic failover
    pub async fn rpc_call<P, R>(&self, chain_id: u64, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Clone,
        R: DeserializeOwned,
    {
        self.providers
            .get(chain_id)?
            .call(&self.client, method, params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("settlex-session-{}-{}.json", std::process::id(), tag))
    }

    // ========================================================================
    // Metadata, theme, and network set
    // ========================================================================

    #[test]
    fn test_app_metadata_defaults() {
        let metadata = AppMetadata::default();
        assert_eq!(metadata.name, "SettleX");
        assert_eq!(metadata.description, "The Settlement Layer for Stablecoins");
        assert_eq!(metadata.url, "https://settlex.fi");
        assert!(metadata.icon.contains("reown"));
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_default_networks() {
        let networks = default_networks();
        assert_eq!(networks.len(), 7);

        // Base Sepolia leads as the default network
        assert_eq!(networks[0].name, "Base Sepolia");
        assert_eq!(networks[0].chain_id, 84532);

        let chain_ids: Vec<u64> = networks.iter().map(|n| n.chain_id).collect();
        for expected in [84532, 421614, 43113, 534351, 11155420, 10143, 300] {
            assert!(chain_ids.contains(&expected), "missing chain {expected}");
        }
    }

    #[test]
    fn test_default_networks_have_valid_profiles() {
        for network in default_networks() {
            assert!(
                network.validate().is_ok(),
                "invalid profile for {}",
                network.name
            );
        }
    }

    // ========================================================================
    // Adapter configuration
    // ========================================================================

    #[test]
    fn test_adapter_config_builder() {
        let config = AdapterConfig::new("pid-123")
            .with_theme(ThemeMode::Light)
            .with_session_path("/tmp/settlex-session.json");

        assert_eq!(config.project_id, "pid-123");
        assert_eq!(config.theme, ThemeMode::Light);
        assert!(config.session_path.is_some());
        assert_eq!(config.networks.len(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_project_id_rejected_before_setup() {
        let config = AdapterConfig::new("");
        let result = WalletAdapter::new(config);
        assert!(matches!(result, Err(ProviderError::MissingProjectId(_))));
    }

    #[test]
    fn test_empty_networks_rejected() {
        let config = AdapterConfig::new("pid").with_networks(Vec::new());
        assert!(matches!(
            WalletAdapter::new(config),
            Err(ProviderError::NoNetworks)
        ));
    }

    #[test]
    fn test_duplicate_chain_ids_rejected() {
        let config = AdapterConfig::new("pid")
            .with_networks(vec![presets::base_sepolia(), presets::base_sepolia()]);
        assert!(matches!(
            WalletAdapter::new(config),
            Err(ProviderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_project_id_from_env() {
        // Single test owns the variable so parallel tests never race on it
        std::env::remove_var(PROJECT_ID_ENV);
        assert!(matches!(
            AdapterConfig::from_env(),
            Err(ProviderError::MissingProjectId(_))
        ));
        assert!(WalletAdapter::from_env().is_err());

        std::env::set_var(PROJECT_ID_ENV, "test-project-id");
        let adapter = WalletAdapter::from_env().unwrap();
        assert_eq!(adapter.project_id(), "test-project-id");
        std::env::remove_var(PROJECT_ID_ENV);
    }

    // ========================================================================
    // Adapter behavior
    // ========================================================================

    #[tokio::test]
    async fn test_adapter_construction() {
        let adapter = WalletAdapter::new(AdapterConfig::new("pid")).unwrap();

        assert_eq!(adapter.networks().len(), 7);
        assert_eq!(adapter.default_network().chain_id, 84532);

        // The pool hands back the provider registered under each chain id
        let base = adapter.provider_for(84532).unwrap();
        assert_eq!(base.network(), "Base Sepolia");
        assert_eq!(adapter.provider_for(10143).unwrap().network(), "Monad Testnet");
        assert!(matches!(
            adapter.provider_for(1),
            Err(ProviderError::UnknownChain(1))
        ));

        // Fresh session: no account, default chain active
        let session = adapter.session().current().await;
        assert!(session.account.is_none());
        assert_eq!(session.chain_id, 84532);
    }

    #[tokio::test]
    async fn test_switch_network() {
        let adapter = WalletAdapter::new(AdapterConfig::new("pid")).unwrap();

        adapter.switch_network(421614).await.unwrap();
        assert_eq!(adapter.session().current().await.chain_id, 421614);
        assert_eq!(adapter.active_network().await.name, "Arbitrum Sepolia");

        // Unknown chains are rejected and the session stays put
        assert!(adapter.switch_network(1).await.is_err());
        assert_eq!(adapter.session().current().await.chain_id, 421614);
    }

    #[tokio::test]
    async fn test_session_connect_disconnect() {
        let manager = SessionManager::in_memory(WalletSession {
            account: None,
            chain_id: 84532,
        });

        manager.connect("0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B").await.unwrap();
        let session = manager.current().await;
        assert_eq!(
            session.account.as_deref(),
            Some("0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B")
        );

        manager.disconnect().await.unwrap();
        assert!(manager.current().await.account.is_none());
        // Chain survives a disconnect
        assert_eq!(manager.current().await.chain_id, 84532);
    }

    #[tokio::test]
    async fn test_session_file_persistence() {
        let path = temp_session_path("persist");
        let _ = std::fs::remove_file(&path);

        let fallback = WalletSession {
            account: None,
            chain_id: 84532,
        };

        {
            let manager = SessionManager::with_file(path.clone(), fallback.clone());
            manager.connect("0x1111111111111111111111111111111111111111").await.unwrap();
            manager.switch_chain(43113).await.unwrap();
        }

        // A new manager picks the persisted session back up
        let restored = SessionManager::with_file(path.clone(), fallback);
        let session = restored.current().await;
        assert_eq!(
            session.account.as_deref(),
            Some("0x1111111111111111111111111111111111111111")
        );
        assert_eq!(session.chain_id, 43113);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_wallet_session_serde() {
        let session = WalletSession {
            account: Some("0x2222222222222222222222222222222222222222".to_string()),
            chain_id: 300,
        };

        let json = serde_json::to_string(&session).unwrap();
        let restored: WalletSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);

        // Account is optional in stored sessions
        let bare: WalletSession = serde_json::from_str(r#"{"chain_id": 84532}"#).unwrap();
        assert!(bare.account.is_none());
    }
}
