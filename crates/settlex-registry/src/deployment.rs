//! Spoke deployment directory
//!
//! Where the Spoke contract lives on each supported chain, together with the
//! protocol chain selector used in cross-chain routing. Selectors are small
//! protocol-assigned numbers, not EVM chain ids: the transfer payload packs
//! them into uint24 fields, and chain ids like Optimism Sepolia's 11155420
//! do not fit.

use crate::{RegistryError, Result, UINT24_MAX};
use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Spoke contract on Arbitrum Sepolia
pub const SPOKE_ARBITRUM: Address = address!("7D9f7b6dAA5407bFd4A935aae48c64aa0FE69bcb");
/// Spoke contract on Base Sepolia
pub const SPOKE_BASE: Address = address!("91e2E34718EFD173389c7876BBBb57594cE27e37");
/// Spoke contract on Optimism Sepolia
pub const SPOKE_OPTIMISM: Address = address!("AAb11c371F68a1fD16E10d77642a7E4EE5097619");
/// Spoke contract on Monad Testnet
pub const SPOKE_MONAD: Address = address!("e21c9e823C31aD208db00457d41A817D01B807B9");
/// Spoke contract on Avalanche Fuji
pub const SPOKE_AVALANCHE: Address = address!("6D7eD1Df1D9c39520F4512bdF8BC8F0D1fEb805C");
/// Spoke contract on zkSync Sepolia
pub const SPOKE_ZKSYNC: Address = address!("52A080b057ff51274C60b33f48b82bDd788bA0d1");

/// A Spoke contract deployment on one chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpokeDeployment {
    /// Chain display name the deployment belongs to
    pub chain: String,
    /// Deployed contract address
    pub address: Address,
    /// Protocol chain selector (uint24 domain number)
    pub selector: u32,
}

impl SpokeDeployment {
    /// Creates a new deployment record
    pub fn new(chain: &str, address: Address, selector: u32) -> Self {
        Self {
            chain: chain.to_string(),
            address,
            selector,
        }
    }
}

/// Directory of Spoke deployments, one per chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpokeDirectory {
    deployments: Vec<SpokeDeployment>,
}

impl SpokeDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self {
            deployments: Vec::new(),
        }
    }

    /// Creates a directory with the bundled deployments pre-loaded
    pub fn with_defaults() -> Self {
        let mut directory = Self::new();
        directory.load_defaults();
        directory
    }

    /// Loads the bundled deployments
    ///
    /// The Arbitrum Spoke is live even though Arbitrum is not in the default
    /// display set; it stays addressable for routing.
    pub fn load_defaults(&mut self) {
        self.add_deployment(SpokeDeployment::new("BASE", SPOKE_BASE, 1));
        self.add_deployment(SpokeDeployment::new("Optimism", SPOKE_OPTIMISM, 2));
        self.add_deployment(SpokeDeployment::new("Arbitrum", SPOKE_ARBITRUM, 3));
        self.add_deployment(SpokeDeployment::new("Monad", SPOKE_MONAD, 4));
        self.add_deployment(SpokeDeployment::new("Avalanche", SPOKE_AVALANCHE, 5));
        self.add_deployment(SpokeDeployment::new("zkSync", SPOKE_ZKSYNC, 6));
    }

    /// Appends a deployment record
    ///
    /// Duplicates are reported by [`validate`](Self::validate), not here.
    pub fn add_deployment(&mut self, deployment: SpokeDeployment) {
        self.deployments.push(deployment);
    }

    /// Replaces the record for the same chain, or appends
    pub fn upsert_deployment(&mut self, deployment: SpokeDeployment) {
        match self
            .deployments
            .iter_mut()
            .find(|d| d.chain == deployment.chain)
        {
            Some(existing) => *existing = deployment,
            None => self.deployments.push(deployment),
        }
    }

    /// Looks up the deployment for a chain name
    pub fn by_chain(&self, chain: &str) -> Option<&SpokeDeployment> {
        self.deployments.iter().find(|d| d.chain == chain)
    }

    /// Looks up the deployment for a protocol chain selector
    pub fn by_selector(&self, selector: u32) -> Option<&SpokeDeployment> {
        self.deployments.iter().find(|d| d.selector == selector)
    }

    /// Returns the Spoke address for a chain name, if deployed
    pub fn address_for(&self, chain: &str) -> Option<Address> {
        self.by_chain(chain).map(|d| d.address)
    }

    /// Iterates over the records
    pub fn iter(&self) -> impl Iterator<Item = &SpokeDeployment> {
        self.deployments.iter()
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// Returns true if the directory has no records
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    /// Checks that chains and selectors are unique and selectors fit uint24
    pub fn validate(&self) -> Result<()> {
        for (i, deployment) in self.deployments.iter().enumerate() {
            if deployment.selector > UINT24_MAX {
                return Err(RegistryError::SelectorOutOfRange(deployment.selector));
            }
            for other in &self.deployments[i + 1..] {
                if deployment.chain == other.chain {
                    return Err(RegistryError::DuplicateSpoke(deployment.chain.clone()));
                }
                if deployment.selector == other.selector {
                    return Err(RegistryError::DuplicateSelector(deployment.selector));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_deployments() {
        let directory = SpokeDirectory::with_defaults();
        assert_eq!(directory.len(), 6);
        assert_eq!(directory.address_for("BASE"), Some(SPOKE_BASE));
        assert_eq!(directory.address_for("Optimism"), Some(SPOKE_OPTIMISM));
        assert_eq!(directory.address_for("Arbitrum"), Some(SPOKE_ARBITRUM));
        assert_eq!(directory.address_for("Monad"), Some(SPOKE_MONAD));
        assert_eq!(directory.address_for("Avalanche"), Some(SPOKE_AVALANCHE));
        assert_eq!(directory.address_for("zkSync"), Some(SPOKE_ZKSYNC));
    }

    #[test]
    fn test_base_spoke_address() {
        let expected = address!("91e2E34718EFD173389c7876BBBb57594cE27e37");
        assert_eq!(SPOKE_BASE, expected);
    }

    #[test]
    fn test_address_format() {
        let addr_str = format!("{}", SPOKE_BASE);
        assert!(addr_str.starts_with("0x"));
        assert_eq!(addr_str.len(), 42); // 0x + 40 hex chars
    }

    #[test]
    fn test_unknown_chain_returns_none() {
        let directory = SpokeDirectory::with_defaults();
        assert!(directory.by_chain("Solana").is_none());
        assert!(directory.address_for("Solana").is_none());
    }

    #[test]
    fn test_selector_lookup() {
        let directory = SpokeDirectory::with_defaults();
        assert_eq!(directory.by_selector(1).unwrap().chain, "BASE");
        assert_eq!(directory.by_selector(6).unwrap().chain, "zkSync");
        assert!(directory.by_selector(99).is_none());
    }

    #[test]
    fn test_selectors_fit_uint24() {
        let directory = SpokeDirectory::with_defaults();
        for deployment in directory.iter() {
            assert!(deployment.selector <= UINT24_MAX);
        }
        assert!(directory.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_chain() {
        let mut directory = SpokeDirectory::new();
        directory.add_deployment(SpokeDeployment::new("BASE", SPOKE_BASE, 1));
        directory.add_deployment(SpokeDeployment::new("BASE", SPOKE_OPTIMISM, 2));
        assert!(matches!(
            directory.validate(),
            Err(RegistryError::DuplicateSpoke(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_selector() {
        let mut directory = SpokeDirectory::new();
        directory.add_deployment(SpokeDeployment::new("BASE", SPOKE_BASE, 1));
        directory.add_deployment(SpokeDeployment::new("Optimism", SPOKE_OPTIMISM, 1));
        assert!(matches!(
            directory.validate(),
            Err(RegistryError::DuplicateSelector(1))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_selector() {
        let mut directory = SpokeDirectory::new();
        directory.add_deployment(SpokeDeployment::new("BASE", SPOKE_BASE, UINT24_MAX + 1));
        assert!(matches!(
            directory.validate(),
            Err(RegistryError::SelectorOutOfRange(_))
        ));
    }

    #[test]
    fn test_upsert_replaces_by_chain() {
        let mut directory = SpokeDirectory::with_defaults();
        let before = directory.len();

        directory.upsert_deployment(SpokeDeployment::new("BASE", SPOKE_OPTIMISM, 1));
        assert_eq!(directory.len(), before);
        assert_eq!(directory.address_for("BASE"), Some(SPOKE_OPTIMISM));
    }

    #[test]
    fn test_serde_round_trip() {
        let directory = SpokeDirectory::with_defaults();
        let json = serde_json::to_string(&directory).unwrap();
        // Addresses serialize as checksummed hex strings
        assert!(json.contains("0x91e2E34718EFD173389c7876BBBb57594cE27e37"));

        let back: SpokeDirectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), directory.len());
        assert_eq!(back.address_for("zkSync"), Some(SPOKE_ZKSYNC));
    }
}
