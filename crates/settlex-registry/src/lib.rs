//! # SettleX Registry
//!
//! This crate provides the static configuration tables for the SettleX SDK:
//! which chains the settlement layer runs on, which tokens it settles, and
//! where the Spoke contract is deployed on each chain.
//!
//! ## Features
//!
//! - Chain registry with display metadata and numeric chain ids
//! - Token registry with protocol token ids and per-chain contract addresses
//! - Spoke deployment directory with protocol chain selectors
//! - Registry validation (unique ids, uint24 ranges)
//! - Versioned JSON overlay files for deploy-time extension
//!
//! ## Example
//!
//! ```
//! use settlex_registry::Registry;
//!
//! let registry = Registry::with_defaults();
//! registry.validate().unwrap();
//!
//! let base = registry.chains.by_chain_id(84532).unwrap();
//! assert_eq!(base.name, "BASE");
//!
//! let spoke = registry.spoke_for_chain_id(84532).unwrap();
//! assert_eq!(spoke.chain, "BASE");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

pub mod chain;
pub mod deployment;
pub mod overlay;
pub mod token;

pub use chain::{ChainInfo, ChainRegistry};
pub use deployment::{SpokeDeployment, SpokeDirectory};
pub use overlay::{RegistryFile, REGISTRY_FILE_VERSION};
pub use token::{TokenInfo, TokenRegistry};

/// Largest value representable by the protocol's uint24 identifier fields
/// (chain selectors and protocol token ids).
pub const UINT24_MAX: u32 = 0xFF_FFFF;

/// Registry-related errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Two chain entries share a chain id
    #[error("Duplicate chain id: {0}")]
    DuplicateChainId(u64),

    /// Two chain entries share a display name
    #[error("Duplicate chain name: {0}")]
    DuplicateChainName(String),

    /// A token carries the reserved id zero
    #[error("Token {0}: protocol token id must be positive")]
    ZeroTokenId(String),

    /// Two tokens share a protocol token id
    #[error("Duplicate protocol token id: {0}")]
    DuplicateTokenId(u32),

    /// A protocol token id does not fit in uint24
    #[error("Protocol token id {0} exceeds the uint24 range")]
    TokenIdOutOfRange(u32),

    /// Two Spoke deployments target the same chain
    #[error("Duplicate Spoke deployment for chain: {0}")]
    DuplicateSpoke(String),

    /// Two Spoke deployments share a chain selector
    #[error("Duplicate chain selector: {0}")]
    DuplicateSelector(u32),

    /// A chain selector does not fit in uint24
    #[error("Chain selector {0} exceeds the uint24 range")]
    SelectorOutOfRange(u32),

    /// Overlay file version not understood by this build
    #[error("Unsupported registry file version: {0}")]
    UnsupportedVersion(u32),

    /// Overlay file I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Overlay file JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// The three SettleX configuration tables as one unit.
///
/// Lookups stay on the individual tables; this type exists so callers can
/// construct, validate, and overlay them together.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Chain display registry
    pub chains: ChainRegistry,
    /// Token registry
    pub tokens: TokenRegistry,
    /// Spoke deployment directory
    pub spokes: SpokeDirectory,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the bundled SettleX tables pre-loaded
    pub fn with_defaults() -> Self {
        Self {
            chains: ChainRegistry::with_defaults(),
            tokens: TokenRegistry::with_defaults(),
            spokes: SpokeDirectory::with_defaults(),
        }
    }

    /// Validates all three tables
    pub fn validate(&self) -> Result<()> {
        self.chains.validate()?;
        self.tokens.validate()?;
        self.spokes.validate()?;
        Ok(())
    }

    /// Resolves the Spoke deployment for a chain id by joining the chain
    /// registry with the deployment directory
    pub fn spoke_for_chain_id(&self, chain_id: u64) -> Option<&SpokeDeployment> {
        let chain = self.chains.by_chain_id(chain_id)?;
        self.spokes.by_chain(&chain.name)
    }
}

/// Exposes commonly used registry types.
pub mod prelude {
    pub use super::chain::{ChainInfo, ChainRegistry};
    pub use super::deployment::{SpokeDeployment, SpokeDirectory};
    pub use super::overlay::RegistryFile;
    pub use super::token::{TokenInfo, TokenRegistry};
    pub use super::Registry;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_registry_with_defaults_validates() {
        let registry = Registry::with_defaults();
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_registry_empty() {
        let registry = Registry::new();
        assert!(registry.chains.is_empty());
        assert!(registry.tokens.is_empty());
        assert!(registry.spokes.is_empty());
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_base_lookup_resolves_logo_and_spoke() {
        let registry = Registry::with_defaults();

        let base = registry.chains.by_chain_id(84532).unwrap();
        assert_eq!(base.name, "BASE");
        assert_eq!(base.logo, "/chains/BASE.avif");

        let spoke = registry.spoke_for_chain_id(84532).unwrap();
        assert_eq!(
            spoke.address,
            address!("91e2E34718EFD173389c7876BBBb57594cE27e37")
        );
    }

    #[test]
    fn test_spoke_for_unknown_chain_id() {
        let registry = Registry::with_defaults();
        assert!(registry.spoke_for_chain_id(999_999).is_none());
    }

    #[test]
    fn test_validate_reports_cross_table_issues_independently() {
        let mut registry = Registry::with_defaults();
        registry
            .chains
            .add_chain(ChainInfo::new("Duplicate", "/chains/BASE.avif", 84532));

        match registry.validate() {
            Err(RegistryError::DuplicateChainId(84532)) => {}
            other => panic!("Expected DuplicateChainId, got {:?}", other),
        }
    }
}
