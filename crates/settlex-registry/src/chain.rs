//! Chain display registry
//!
//! The settlement UI shows a fixed list of networks. Each entry carries the
//! display name, the logo asset path served by the front-end, and the numeric
//! EVM chain id used for wallet network switching.

use crate::{RegistryError, Result};
use serde::{Deserialize, Serialize};

/// Display metadata for a supported chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Display name (e.g., "BASE")
    pub name: String,
    /// Logo asset path (e.g., "/chains/BASE.avif")
    pub logo: String,
    /// Numeric EVM chain id (e.g., 84532)
    pub chain_id: u64,
}

impl ChainInfo {
    /// Creates a new chain entry
    pub fn new(name: &str, logo: &str, chain_id: u64) -> Self {
        Self {
            name: name.to_string(),
            logo: logo.to_string(),
            chain_id,
        }
    }
}

/// Ordered registry of displayable chains
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainRegistry {
    chains: Vec<ChainInfo>,
}

impl ChainRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { chains: Vec::new() }
    }

    /// Creates a registry with the bundled chain list pre-loaded
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.load_defaults();
        registry
    }

    /// Loads the bundled chain list
    ///
    /// The launch networks are always present. Networks awaiting a Spoke
    /// deployment are compiled in behind their feature flag.
    pub fn load_defaults(&mut self) {
        self.add_chain(ChainInfo::new("BASE", "/chains/BASE.avif", 84532));
        self.add_chain(ChainInfo::new("Optimism", "/chains/Optimism.avif", 11155420));
        #[cfg(feature = "scroll")]
        self.add_chain(ChainInfo::new("Scroll", "/chains/Scroll.avif", 534351));
        #[cfg(feature = "arbitrum")]
        self.add_chain(ChainInfo::new("ARB", "/chains/ARB.avif", 421614));
        #[cfg(feature = "ethereum")]
        self.add_chain(ChainInfo::new("Ethereum", "/chains/Ethereum.avif", 1));
        #[cfg(feature = "bsc")]
        self.add_chain(ChainInfo::new("BSC", "/chains/BSC.avif", 56));
        #[cfg(feature = "unichain")]
        self.add_chain(ChainInfo::new("Unichain", "/chains/Unichain.svg", 130));
        #[cfg(feature = "polygon")]
        self.add_chain(ChainInfo::new("Polygon", "/chains/Polygon.avif", 137));
        self.add_chain(ChainInfo::new("Monad", "/chains/Monad.svg", 10143));
        self.add_chain(ChainInfo::new("Avalanche", "/chains/Avalanche.png", 43113));
        self.add_chain(ChainInfo::new("zkSync", "/chains/zksync.avif", 300));
        #[cfg(feature = "ronin")]
        self.add_chain(ChainInfo::new("Ronin", "/chains/Ronin.avif", 2020));
        #[cfg(feature = "apechain")]
        self.add_chain(ChainInfo::new("Ape-Chain", "/chains/Ape-Chain.avif", 33139));
        #[cfg(feature = "mode")]
        self.add_chain(ChainInfo::new("Mode", "/chains/Mode.avif", 34443));
        #[cfg(feature = "zircuit")]
        self.add_chain(ChainInfo::new("zircuit", "/chains/zircuit.svg", 48900));
        #[cfg(feature = "linea")]
        self.add_chain(ChainInfo::new("Linea", "/chains/Linea.avif", 59144));
        #[cfg(feature = "blast")]
        self.add_chain(ChainInfo::new("blast", "/chains/blast.png", 81457));
        #[cfg(feature = "taiko")]
        self.add_chain(ChainInfo::new("Taiko", "/chains/Taiko.avif", 167000));
    }

    /// Appends a chain entry
    ///
    /// Duplicate chain ids are reported by [`validate`](Self::validate), not
    /// here; missing entries are represented by lookups returning `None`.
    pub fn add_chain(&mut self, chain: ChainInfo) {
        self.chains.push(chain);
    }

    /// Replaces the entry with the same chain id, or appends
    pub fn upsert_chain(&mut self, chain: ChainInfo) {
        match self.chains.iter_mut().find(|c| c.chain_id == chain.chain_id) {
            Some(existing) => *existing = chain,
            None => self.chains.push(chain),
        }
    }

    /// Looks up a chain by its numeric chain id
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&ChainInfo> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// Looks up a chain by display name
    pub fn by_name(&self, name: &str) -> Option<&ChainInfo> {
        self.chains.iter().find(|c| c.name == name)
    }

    /// Returns all chain ids in display order
    pub fn chain_ids(&self) -> Vec<u64> {
        self.chains.iter().map(|c| c.chain_id).collect()
    }

    /// Iterates over the entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &ChainInfo> {
        self.chains.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Returns true if the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Checks that chain ids and display names are unique
    pub fn validate(&self) -> Result<()> {
        for (i, chain) in self.chains.iter().enumerate() {
            for other in &self.chains[i + 1..] {
                if chain.chain_id == other.chain_id {
                    return Err(RegistryError::DuplicateChainId(chain.chain_id));
                }
                if chain.name == other.name {
                    return Err(RegistryError::DuplicateChainName(chain.name.clone()));
                }
            }
        }
        Ok(())
    }
}
