//! Token registry
//!
//! Tokens the settlement layer can move. Each token has a protocol-wide
//! numeric id (the `protocolTokenId` the Spoke contract expects in transfer
//! payloads) plus the token's contract address on every chain it is deployed
//! to. A chain id absent from the address map means the token is native or
//! not yet supported there.

use crate::{RegistryError, Result, UINT24_MAX};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token metadata and per-chain contract addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Display name (e.g., "USDT")
    pub name: String,
    /// Logo asset path (e.g., "/tokens/usdt.png")
    pub logo: String,
    /// Protocol-wide token id, stable across chains
    pub protocol_token_id: u32,
    /// Contract address per chain id
    #[serde(default)]
    pub contract_addresses: HashMap<u64, Address>,
}

impl TokenInfo {
    /// Creates a new token entry with an empty address map
    pub fn new(name: &str, logo: &str, protocol_token_id: u32) -> Self {
        Self {
            name: name.to_string(),
            logo: logo.to_string(),
            protocol_token_id,
            contract_addresses: HashMap::new(),
        }
    }

    /// Adds a contract address for a chain
    pub fn with_address(mut self, chain_id: u64, address: Address) -> Self {
        self.contract_addresses.insert(chain_id, address);
        self
    }

    /// Returns the token's contract address on a chain, if deployed there
    pub fn address_on(&self, chain_id: u64) -> Option<Address> {
        self.contract_addresses.get(&chain_id).copied()
    }

    /// Returns true if the token has a contract on the chain
    pub fn is_deployed_on(&self, chain_id: u64) -> bool {
        self.contract_addresses.contains_key(&chain_id)
    }

    /// Returns the chain ids the token is deployed on, sorted
    pub fn deployed_chains(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.contract_addresses.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Ordered registry of settleable tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRegistry {
    tokens: Vec<TokenInfo>,
}

impl TokenRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Creates a registry with the bundled token list pre-loaded
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.load_defaults();
        registry
    }

    /// Loads the bundled token list
    ///
    /// USDT is live on the launch networks. The remaining tokens have
    /// reserved ids but no deployments yet; they are compiled in behind
    /// their feature flag with empty address maps.
    pub fn load_defaults(&mut self) {
        use alloy::primitives::address;

        self.add_token(
            TokenInfo::new("USDT", "/tokens/usdt.png", 1)
                .with_address(84532, address!("0b8C9Cf4F43811D9A22Be732AbE81617D4BD4183"))
                .with_address(11155420, address!("0CeD166eA80d4e88Be1ce546FbBB07F410A47ca0"))
                .with_address(10143, address!("a0dE9f0c2626462E1fEf5db158FF0350e3F94215"))
                .with_address(43113, address!("a3c2D2Be95B29B6C6909fF3Ad19e82995BA283DC"))
                .with_address(300, address!("b8c7e1f97C2D6C1893B1fEe7D0c42A9468761908")),
        );
        // ETH is native, no contract addresses
        #[cfg(feature = "eth")]
        self.add_token(TokenInfo::new("ETH", "/tokens/eth.png", 2));
        #[cfg(feature = "weth")]
        self.add_token(TokenInfo::new("WETH", "/tokens/weth.png", 3));
        #[cfg(feature = "usdc")]
        self.add_token(TokenInfo::new("USDC", "/tokens/usdc.png", 4));
        #[cfg(feature = "pufeth")]
        self.add_token(TokenInfo::new("PufETH", "/tokens/pufeth.png", 5));
    }

    /// Appends a token entry
    ///
    /// Duplicate ids are reported by [`validate`](Self::validate), not here.
    pub fn add_token(&mut self, token: TokenInfo) {
        self.tokens.push(token);
    }

    /// Replaces the entry with the same name, or appends
    pub fn upsert_token(&mut self, token: TokenInfo) {
        match self.tokens.iter_mut().find(|t| t.name == token.name) {
            Some(existing) => *existing = token,
            None => self.tokens.push(token),
        }
    }

    /// Looks up a token by display name
    pub fn by_name(&self, name: &str) -> Option<&TokenInfo> {
        self.tokens.iter().find(|t| t.name == name)
    }

    /// Looks up a token by protocol token id
    pub fn by_protocol_id(&self, protocol_token_id: u32) -> Option<&TokenInfo> {
        self.tokens
            .iter()
            .find(|t| t.protocol_token_id == protocol_token_id)
    }

    /// Returns the tokens deployed on a chain, in display order
    pub fn tokens_on_chain(&self, chain_id: u64) -> Vec<&TokenInfo> {
        self.tokens
            .iter()
            .filter(|t| t.is_deployed_on(chain_id))
            .collect()
    }

    /// Iterates over the entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &TokenInfo> {
        self.tokens.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the registry has no entries
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks that protocol token ids are positive, within uint24 range,
    /// and unique
    ///
    /// Whether an id matches what the Spoke contracts were deployed with is
    /// an invariant owned by the protocol deployment; this only catches
    /// table-level mistakes.
    pub fn validate(&self) -> Result<()> {
        for (i, token) in self.tokens.iter().enumerate() {
            if token.protocol_token_id == 0 {
                return Err(RegistryError::ZeroTokenId(token.name.clone()));
            }
            if token.protocol_token_id > UINT24_MAX {
                return Err(RegistryError::TokenIdOutOfRange(token.protocol_token_id));
            }
            for other in &self.tokens[i + 1..] {
                if token.protocol_token_id == other.protocol_token_id {
                    return Err(RegistryError::DuplicateTokenId(token.protocol_token_id));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use proptest::prelude::*;

    #[test]
    fn test_usdt_bundled() {
        let registry = TokenRegistry::with_defaults();
        let usdt = registry.by_name("USDT").unwrap();
        assert_eq!(usdt.protocol_token_id, 1);
        assert_eq!(usdt.logo, "/tokens/usdt.png");
        assert_eq!(usdt.deployed_chains(), vec![300, 10143, 43113, 84532, 11155420]);
    }

    #[test]
    fn test_usdt_base_address() {
        let registry = TokenRegistry::with_defaults();
        let usdt = registry.by_name("USDT").unwrap();
        assert_eq!(
            usdt.address_on(84532),
            Some(address!("0b8C9Cf4F43811D9A22Be732AbE81617D4BD4183"))
        );
    }

    #[test]
    fn test_lookup_by_protocol_id() {
        let registry = TokenRegistry::with_defaults();
        let usdt = registry.by_protocol_id(1).unwrap();
        assert_eq!(usdt.name, "USDT");
        assert!(registry.by_protocol_id(999).is_none());
    }

    #[test]
    fn test_missing_chain_mapping_is_none() {
        let registry = TokenRegistry::with_defaults();
        let usdt = registry.by_name("USDT").unwrap();
        // No USDT deployment on Ethereum mainnet
        assert_eq!(usdt.address_on(1), None);
        assert!(!usdt.is_deployed_on(1));
    }

    #[test]
    fn test_tokens_on_chain() {
        let registry = TokenRegistry::with_defaults();
        let on_base = registry.tokens_on_chain(84532);
        assert!(on_base.iter().any(|t| t.name == "USDT"));
        // Nothing is deployed on Ethereum mainnet yet
        assert!(registry.tokens_on_chain(1).is_empty());
    }

    #[test]
    fn test_address_format() {
        // Address display is 0x followed by 40 hex chars
        let registry = TokenRegistry::with_defaults();
        for token in registry.iter() {
            for chain_id in token.deployed_chains() {
                let addr = format!("{}", token.address_on(chain_id).unwrap());
                assert!(addr.starts_with("0x"));
                assert_eq!(addr.len(), 42);
            }
        }
    }

    #[test]
    fn test_ids_positive_and_unique() {
        let registry = TokenRegistry::with_defaults();
        for token in registry.iter() {
            assert!(token.protocol_token_id > 0);
        }
        assert!(registry.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_id() {
        let mut registry = TokenRegistry::new();
        registry.add_token(TokenInfo::new("BAD", "/tokens/bad.png", 0));
        assert!(matches!(
            registry.validate(),
            Err(RegistryError::ZeroTokenId(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_id() {
        let mut registry = TokenRegistry::new();
        registry.add_token(TokenInfo::new("A", "/tokens/a.png", 9));
        registry.add_token(TokenInfo::new("B", "/tokens/b.png", 9));
        assert!(matches!(
            registry.validate(),
            Err(RegistryError::DuplicateTokenId(9))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_id() {
        let mut registry = TokenRegistry::new();
        registry.add_token(TokenInfo::new("BIG", "/tokens/big.png", UINT24_MAX + 1));
        assert!(matches!(
            registry.validate(),
            Err(RegistryError::TokenIdOutOfRange(_))
        ));
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let mut registry = TokenRegistry::with_defaults();
        let before = registry.len();

        let replacement = TokenInfo::new("USDT", "/tokens/usdt-v2.png", 1)
            .with_address(84532, address!("0b8C9Cf4F43811D9A22Be732AbE81617D4BD4183"));
        registry.upsert_token(replacement);

        assert_eq!(registry.len(), before);
        assert_eq!(registry.by_name("USDT").unwrap().logo, "/tokens/usdt-v2.png");
    }

    #[cfg(feature = "usdc")]
    #[test]
    fn test_usdc_feature_entry_has_no_deployments() {
        let registry = TokenRegistry::with_defaults();
        let usdc = registry.by_name("USDC").unwrap();
        assert_eq!(usdc.protocol_token_id, 4);
        assert!(usdc.deployed_chains().is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let registry = TokenRegistry::with_defaults();
        let json = serde_json::to_string(&registry).unwrap();
        let back: TokenRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), registry.len());
        assert_eq!(
            back.by_name("USDT").unwrap().address_on(300),
            registry.by_name("USDT").unwrap().address_on(300)
        );
    }

    proptest! {
        #[test]
        fn test_any_in_range_id_validates_alone(id in 1u32..=UINT24_MAX) {
            let mut registry = TokenRegistry::new();
            registry.add_token(TokenInfo::new("X", "/tokens/x.png", id));
            prop_assert!(registry.validate().is_ok());
        }

        #[test]
        fn test_duplicate_ids_always_rejected(id in 1u32..=UINT24_MAX) {
            let mut registry = TokenRegistry::new();
            registry.add_token(TokenInfo::new("A", "/tokens/a.png", id));
            registry.add_token(TokenInfo::new("B", "/tokens/b.png", id));
            prop_assert!(registry.validate().is_err());
        }
    }
}
