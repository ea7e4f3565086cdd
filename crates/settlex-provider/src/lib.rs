//! # SettleX Provider
//!
//! Provider wiring for the SettleX SDK. Every settlement network is
//! described by a [`NetworkProfile`] (display name, chain id, ordered RPC
//! endpoints, retry budget); a [`ManagedProvider`] drives calls against
//! those endpoints with health tracking and rotation; one shared
//! [`RpcClient`] carries the HTTP traffic with connection reuse and rate
//! limiting; a [`ProviderPool`] hands out providers by chain id. On top sit
//! the wallet [`adapter`], the TTL [`cache`], and the process-wide
//! [`context`].
//!
//! ## Example
//!
//! ```ignore
//! use settlex_provider::{presets, ProviderPool, RpcClient};
//!
//! let pool = ProviderPool::new();
//! pool.add(presets::base_sepolia())?;
//!
//! let client = RpcClient::new()?;
//! let provider = pool.get(84532)?;
//! let chain: String = provider
//!     .call(&client, "eth_chainId", Vec::<String>::new())
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use dashmap::DashMap;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use url::Url;

pub mod adapter;
pub mod cache;
pub mod context;

pub use adapter::{
    default_networks, AdapterConfig, AppMetadata, SessionManager, ThemeMode, WalletAdapter,
    WalletSession, PROJECT_ID_ENV,
};
pub use cache::{QueryCache, DEFAULT_QUERY_TTL};
pub use context::AppContext;

/// Provider-related errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Endpoint URL failed to parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration value rejected at construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No provider registered for the chain
    #[error("No provider for chain id {0}")]
    UnknownChain(u64),

    /// Every configured endpoint failed
    #[error("All endpoints failed")]
    AllEndpointsFailed,

    /// Wallet project identifier missing from the environment
    #[error("Project ID is not defined: set {0}")]
    MissingProjectId(&'static str),

    /// Adapter configured with no networks
    #[error("No networks configured")]
    NoNetworks,

    /// Global application context accessed before initialization
    #[error("Application context is not initialized")]
    NotInitialized,

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (session persistence)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error response from an RPC node
    #[error("RPC error: code={code}, message={message}")]
    RpcError {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// One settlement network: identity plus RPC wiring
///
/// The profile doubles as the wallet-facing network entry (name, chain id)
/// and the transport configuration its provider runs on. Endpoints are in
/// preference order; the first is primary, the rest are fallbacks.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    /// Display name, e.g. "Base Sepolia"
    pub name: String,
    /// EVM chain id
    pub chain_id: u64,
    /// RPC endpoints in preference order
    pub endpoints: Vec<String>,
    /// Extra attempts after a failed call
    pub max_retries: u32,
    /// Pause between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl NetworkProfile {
    /// Creates a profile with a single endpoint and the default retry budget
    pub fn new(name: impl Into<String>, chain_id: u64, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chain_id,
            endpoints: vec![url.into()],
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }

    /// Appends a fallback endpoint
    pub fn with_fallback(mut self, url: impl Into<String>) -> Self {
        self.endpoints.push(url.into());
        self
    }

    /// Sets the number of extra attempts after a failed call
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the pause between attempts
    pub fn with_retry_delay(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Checks the profile is usable: named, a real chain id, parseable endpoints
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("network name is empty".into()));
        }
        if self.chain_id == 0 {
            return Err(ProviderError::InvalidConfig(
                "chain id must be nonzero".into(),
            ));
        }
        if self.endpoints.is_empty() {
            return Err(ProviderError::InvalidConfig(format!(
                "{} has no rpc endpoints",
                self.name
            )));
        }
        for endpoint in &self.endpoints {
            Url::parse(endpoint).map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;
        }
        Ok(())
    }
}

/// Health classification for a single endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointHealth {
    /// Serving requests at normal latency
    Healthy,
    /// Slow, or failing often enough to distrust
    Degraded,
    /// Failing more often than not
    Unhealthy,
    /// No traffic observed yet
    Unknown,
}

/// Average latency at or above this marks a serving endpoint degraded
const SLOW_RESPONSE_MS: u64 = 1000;
/// Failure rate above this marks an endpoint unhealthy
const UNHEALTHY_FAILURE_RATE: f64 = 0.5;
/// Failure rate above this marks an endpoint degraded
const DEGRADED_FAILURE_RATE: f64 = 0.2;

/// Traffic statistics for one endpoint
#[derive(Debug, Clone)]
pub struct EndpointInfo {
    /// The endpoint URL
    pub url: String,
    /// Current classification
    pub health: EndpointHealth,
    /// Requests observed
    pub total_requests: u64,
    /// Failures observed
    pub total_failures: u64,
    /// Rolling average response time in milliseconds
    pub avg_response_ms: u64,
    /// When the endpoint last served a request
    pub last_success: Option<Instant>,
    /// When the endpoint last failed one
    pub last_failure: Option<Instant>,
}

impl EndpointInfo {
    fn new(url: String) -> Self {
        Self {
            url,
            health: EndpointHealth::Unknown,
            total_requests: 0,
            total_failures: 0,
            avg_response_ms: 0,
            last_success: None,
            last_failure: None,
        }
    }

    // A served request reclassifies by latency alone
    fn observe_success(&mut self, elapsed_ms: u64) {
        self.last_success = Some(Instant::now());
        let prior = self.total_requests;
        self.total_requests += 1;
        self.avg_response_ms = (self.avg_response_ms * prior + elapsed_ms) / self.total_requests;
        self.health = if self.avg_response_ms < SLOW_RESPONSE_MS {
            EndpointHealth::Healthy
        } else {
            EndpointHealth::Degraded
        };
    }

    // A failure reclassifies by failure rate, and only downward
    fn observe_failure(&mut self) {
        self.last_failure = Some(Instant::now());
        self.total_requests += 1;
        self.total_failures += 1;
        let rate = self.total_failures as f64 / self.total_requests as f64;
        if rate > UNHEALTHY_FAILURE_RATE {
            self.health = EndpointHealth::Unhealthy;
        } else if rate > DEGRADED_FAILURE_RATE {
            self.health = EndpointHealth::Degraded;
        }
    }

    /// Fraction of observed requests that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 1.0;
        }
        1.0 - self.total_failures as f64 / self.total_requests as f64
    }
}

/// Call surface for one network's endpoints
///
/// Tracks per-endpoint health and rotates away from endpoints that stop
/// answering. Calls go through a shared [`RpcClient`]; the provider only
/// decides which URL each attempt lands on.
#[derive(Debug)]
pub struct ManagedProvider {
    name: String,
    chain_id: u64,
    max_retries: u32,
    retry_delay: Duration,
    endpoints: RwLock<Vec<EndpointInfo>>,
    active: RwLock<usize>,
}

impl ManagedProvider {
    /// Builds the provider for a validated network profile
    pub fn new(profile: NetworkProfile) -> Result<Self> {
        profile.validate()?;
        let endpoints = profile
            .endpoints
            .iter()
            .map(|url| EndpointInfo::new(url.clone()))
            .collect();
        Ok(Self {
            name: profile.name,
            chain_id: profile.chain_id,
            max_retries: profile.max_retries,
            retry_delay: Duration::from_millis(profile.retry_delay_ms),
            endpoints: RwLock::new(endpoints),
            active: RwLock::new(0),
        })
    }

    /// Network display name
    pub fn network(&self) -> &str {
        &self.name
    }

    /// Chain id this provider serves
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// URL the next attempt will use
    pub async fn active_url(&self) -> String {
        let idx = *self.active.read().await;
        let endpoints = self.endpoints.read().await;
        endpoints
            .get(idx)
            .or_else(|| endpoints.first())
            .map(|e| e.url.clone())
            .unwrap_or_default()
    }

    /// Snapshot of per-endpoint statistics
    pub async fn stats(&self) -> Vec<EndpointInfo> {
        self.endpoints.read().await.clone()
    }

    /// Makes a JSON-RPC call, rotating endpoints on transport failure
    ///
    /// Transport failures count against endpoint health and consume a retry
    /// after the configured delay. An error response comes from a live
    /// endpoint, so it is returned immediately without burning retries.
    pub async fn call<P, R>(&self, client: &RpcClient, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Clone,
        R: DeserializeOwned,
    {
        let attempts = u64::from(self.max_retries) + 1;
        let mut last_error = ProviderError::AllEndpointsFailed;

        for attempt in 0..attempts {
            if attempt > 0 {
                tokio::time::sleep(self.retry_delay).await;
            }
            let url = self.active_url().await;
            let started = Instant::now();
            match client.rpc_call(&url, method, params.clone()).await {
                Ok(result) => {
                    self.note_success(started.elapsed().as_millis() as u64).await;
                    return Ok(result);
                }
                Err(error @ ProviderError::RpcError { .. }) => {
                    self.note_success(started.elapsed().as_millis() as u64).await;
                    return Err(error);
                }
                Err(error) => {
                    tracing::debug!(
                        network = %self.name,
                        %url,
                        attempt,
                        "rpc transport failure: {error}"
                    );
                    self.note_failure().await;
                    last_error = error;
                }
            }
        }
        Err(last_error)
    }

    async fn note_success(&self, elapsed_ms: u64) {
        let idx = *self.active.read().await;
        let mut endpoints = self.endpoints.write().await;
        if let Some(endpoint) = endpoints.get_mut(idx) {
            endpoint.observe_success(elapsed_ms);
        }
    }

    async fn note_failure(&self) {
        let mut idx = self.active.write().await;
        let mut endpoints = self.endpoints.write().await;
        if let Some(endpoint) = endpoints.get_mut(*idx) {
            endpoint.observe_failure();
        }

        // Rotate to the nearest endpoint not marked unhealthy
        let count = endpoints.len();
        for step in 1..count {
            let candidate = (*idx + step) % count;
            if endpoints[candidate].health != EndpointHealth::Unhealthy {
                tracing::info!(
                    network = %self.name,
                    from = %endpoints[*idx].url,
                    to = %endpoints[candidate].url,
                    "rotating rpc endpoint"
                );
                *idx = candidate;
                break;
            }
        }
    }
}

// ============================================================================
// HTTP transport
// ============================================================================

/// Settings for the shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
    /// How long an idle connection is kept, in seconds
    pub pool_idle_timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// User agent header
    pub user_agent: String,
    /// Ask for gzip-compressed responses
    pub gzip: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout_secs: 90,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            user_agent: format!("SettleX/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
        }
    }
}

/// Ceiling on the combined request rate towards RPC endpoints
///
/// Public testnet endpoints throttle aggressively; the shared client smooths
/// bursts from registry refreshes and settlement polling under this ceiling.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Sustained requests per second; must be nonzero
    pub requests_per_second: u32,
    /// Burst allowance on top of the sustained rate; must be nonzero
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 20,
        }
    }
}

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<T: Serialize> {
    /// Protocol version, always "2.0"
    pub jsonrpc: &'static str,
    /// Method name
    pub method: String,
    /// Method parameters
    pub params: T,
    /// Client-assigned request id
    pub id: u64,
}

impl<T: Serialize> JsonRpcRequest<T> {
    /// Wraps a method call in the protocol envelope
    pub fn new(method: impl Into<String>, params: T, id: u64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, serde::Deserialize)]
pub struct JsonRpcResponse<T> {
    /// Protocol version
    pub jsonrpc: String,
    /// Id of the request this answers
    pub id: u64,
    /// Payload on success
    pub result: Option<T>,
    /// Error on failure
    pub error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    /// Collapses the envelope into the payload or the carried error
    pub fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            return Err(ProviderError::RpcError {
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or_else(|| ProviderError::RpcError {
            code: -1,
            message: "response carries neither result nor error".to_string(),
        })
    }
}

/// Error object carried in a JSON-RPC response
#[derive(Debug, Clone, serde::Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
    /// Optional extra data
    pub data: Option<serde_json::Value>,
}

/// Shared HTTP client for JSON-RPC traffic
///
/// One instance serves every network: connections are pooled per host and an
/// optional governor rate limiter throttles the combined request stream.
pub struct RpcClient {
    http: Client,
    limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Client with default settings and no rate limiting
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default(), None)
    }

    /// Client with explicit transport settings and optional rate limiting
    pub fn with_config(
        http_config: HttpClientConfig,
        rate_limit: Option<RateLimitConfig>,
    ) -> Result<Self> {
        let http = Client::builder()
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(http_config.pool_idle_timeout_secs))
            .connect_timeout(Duration::from_secs(http_config.connect_timeout_secs))
            .timeout(Duration::from_secs(http_config.request_timeout_secs))
            .user_agent(&http_config.user_agent)
            .gzip(http_config.gzip)
            .build()
            .map_err(|e| ProviderError::ConnectionFailed(e.to_string()))?;

        let limiter = match rate_limit {
            Some(config) => Some(RateLimiter::direct(Self::quota(&config)?)),
            None => None,
        };

        Ok(Self {
            http,
            limiter,
            next_id: AtomicU64::new(1),
        })
    }

    fn quota(config: &RateLimitConfig) -> Result<Quota> {
        let per_second = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            ProviderError::InvalidConfig("requests_per_second must be nonzero".into())
        })?;
        let burst = NonZeroU32::new(config.burst_size)
            .ok_or_else(|| ProviderError::InvalidConfig("burst_size must be nonzero".into()))?;
        Ok(Quota::per_second(per_second).allow_burst(burst))
    }

    async fn throttle(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Sends one JSON-RPC request to the given endpoint
    pub async fn rpc_call<P, R>(&self, url: &str, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.throttle().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest::new(method, params, id);
        let response = self.http.post(url).json(&request).send().await?;
        response.json::<JsonRpcResponse<R>>().await?.into_result()
    }

    /// Requests issued so far
    pub fn request_count(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst) - 1
    }
}

impl Default for RpcClient {
    fn default() -> Self {
        Self::new().expect("default HTTP client must build")
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("request_count", &self.request_count())
            .field("rate_limited", &self.limiter.is_some())
            .finish()
    }
}

/// Providers for every configured network, keyed by chain id
#[derive(Debug, Default)]
pub struct ProviderPool {
    providers: DashMap<u64, Arc<ManagedProvider>>,
}

impl ProviderPool {
    /// Creates an empty pool
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Builds and registers a provider under the profile's chain id
    ///
    /// Registering the same chain id again replaces the previous provider.
    pub fn add(&self, profile: NetworkProfile) -> Result<()> {
        let provider = ManagedProvider::new(profile)?;
        self.providers.insert(provider.chain_id(), Arc::new(provider));
        Ok(())
    }

    /// Returns the provider serving a chain id
    pub fn get(&self, chain_id: u64) -> Result<Arc<ManagedProvider>> {
        self.providers
            .get(&chain_id)
            .map(|entry| entry.clone())
            .ok_or(ProviderError::UnknownChain(chain_id))
    }

    /// Whether a provider is registered for the chain id
    pub fn contains(&self, chain_id: u64) -> bool {
        self.providers.contains_key(&chain_id)
    }

    /// Registered chain ids in ascending order
    pub fn chain_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.providers.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the pool has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

/// RPC wiring for the seven SettleX test networks
pub mod presets {
    use super::NetworkProfile;

    /// Base Sepolia, the default settlement network
    pub fn base_sepolia() -> NetworkProfile {
        NetworkProfile::new("Base Sepolia", 84532, "https://sepolia.base.org")
            .with_fallback("https://base-sepolia-rpc.publicnode.com")
            .with_max_retries(3)
    }

    /// Arbitrum Sepolia
    pub fn arbitrum_sepolia() -> NetworkProfile {
        NetworkProfile::new(
            "Arbitrum Sepolia",
            421614,
            "https://sepolia-rollup.arbitrum.io/rpc",
        )
        .with_fallback("https://arbitrum-sepolia-rpc.publicnode.com")
    }

    /// Avalanche Fuji
    pub fn avalanche_fuji() -> NetworkProfile {
        NetworkProfile::new(
            "Avalanche Fuji",
            43113,
            "https://api.avax-test.network/ext/bc/C/rpc",
        )
        .with_fallback("https://rpc.ankr.com/avalanche_fuji")
        .with_fallback("https://avalanche-fuji.publicnode.com")
    }

    /// Scroll Sepolia
    pub fn scroll_sepolia() -> NetworkProfile {
        NetworkProfile::new("Scroll Sepolia", 534351, "https://sepolia-rpc.scroll.io")
    }

    /// Optimism Sepolia
    pub fn optimism_sepolia() -> NetworkProfile {
        NetworkProfile::new("Optimism Sepolia", 11155420, "https://sepolia.optimism.io")
            .with_fallback("https://optimism-sepolia-rpc.publicnode.com")
    }

    /// Monad Testnet
    pub fn monad_testnet() -> NetworkProfile {
        NetworkProfile::new("Monad Testnet", 10143, "https://testnet-rpc.monad.xyz")
    }

    /// zkSync Sepolia
    pub fn zksync_sepolia() -> NetworkProfile {
        NetworkProfile::new("zkSync Sepolia", 300, "https://sepolia.era.zksync.dev")
    }
}
