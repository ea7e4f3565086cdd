//! Process-wide application context
//!
//! Composes the wallet adapter and the query cache the way the settlement
//! front end wires its context provider. Initialization is explicit and
//! lazy: nothing is constructed at load time, the first [`AppContext::init`]
//! builds everything, and a missing project id fails the build before any
//! provider exists. Once registered the context lives for the remainder of
//! the process; there is no teardown.

use serde::{de::DeserializeOwned, Serialize};
use std::sync::OnceLock;

use crate::adapter::WalletAdapter;
use crate::cache::QueryCache;
use crate::{ProviderError, Result};

static CONTEXT: OnceLock<AppContext> = OnceLock::new();

/// Wallet adapter plus query cache, shared across the application
#[derive(Debug)]
pub struct AppContext {
    adapter: WalletAdapter,
    cache: QueryCache,
}

impl AppContext {
    /// Composes a context from an adapter and a cache
    ///
    /// Does not register anything globally; use [`AppContext::init`] or
    /// [`AppContext::init_with`] for the process-wide instance.
    pub fn new(adapter: WalletAdapter, cache: QueryCache) -> Self {
        Self { adapter, cache }
    }

    /// Builds a context from the environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(WalletAdapter::from_env()?, QueryCache::new()))
    }

    /// Returns the wallet adapter
    pub fn adapter(&self) -> &WalletAdapter {
        &self.adapter
    }

    /// Returns the query cache
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Initializes the process-wide context from the environment
    ///
    /// The first call constructs and registers the context; later calls
    /// return the already-registered one.
    pub fn init() -> Result<&'static AppContext> {
        if let Some(context) = CONTEXT.get() {
            return Ok(context);
        }
        let context = Self::from_env()?;
        Ok(CONTEXT.get_or_init(|| context))
    }

    /// Registers an explicitly built context as the process-wide one
    ///
    /// Returns the registered context; when one is already registered the
    /// argument is dropped and the existing context is returned.
    pub fn init_with(context: AppContext) -> &'static AppContext {
        CONTEXT.get_or_init(|| context)
    }

    /// Returns the process-wide context, if initialized
    pub fn global() -> Option<&'static AppContext> {
        CONTEXT.get()
    }

    /// Returns the process-wide context or [`ProviderError::NotInitialized`]
    pub fn try_global() -> Result<&'static AppContext> {
        Self::global().ok_or(ProviderError::NotInitialized)
    }

    /// Makes a JSON-RPC call through the query cache
    ///
    /// A valid cached result is returned without touching the network;
    /// otherwise the adapter performs the call and the result is cached
    /// under a key derived from chain, method, and parameters.
    pub async fn cached_rpc_call<P, R>(&self, chain_id: u64, method: &str, params: P) -> Result<R>
    where
        P: Serialize + Clone,
        R: Serialize + DeserializeOwned,
    {
        let key = format!("{chain_id}:{method}:{}", serde_json::to_string(&params)?);

        if let Some(hit) = self.cache.get_json::<R>(&key) {
            return Ok(hit);
        }

        let result: R = self.adapter.rpc_call(chain_id, method, params).await?;
        self.cache.insert_json(&key, &result)?;
        Ok(result)
    }
}
