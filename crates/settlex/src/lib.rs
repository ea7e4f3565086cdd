//! # SettleX - The Settlement Layer for Stablecoins
//!
//! SettleX provides the client configuration layer for cross-chain stablecoin
//! settlement: registries describing the supported chains and tokens, typed
//! calls into the Spoke settlement contract, and wallet/provider wiring for
//! the SettleX test networks. Use feature flags to include only the
//! components you need.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | Registry + Spoke + provider wiring |
//! | `registry` | Chain, token, and Spoke deployment registries |
//! | `spoke` | Spoke contract ABI and call construction |
//! | `provider` | Wallet adapter, query cache, and RPC providers |
//! | `arbitrum`, `scroll`, ... | Staged chain registry entries |
//! | `eth`, `weth`, `usdc`, `pufeth` | Staged token registry entries |
//! | `all-chains` | Every staged chain entry |
//! | `all-tokens` | Every staged token entry |
//! | `full` | Everything |
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! # The whole configuration layer
//! settlex = "0.1"
//!
//! # Registries only
//! settlex = { version = "0.1", default-features = false, features = ["registry"] }
//!
//! # Everything including staged chains and tokens
//! settlex = { version = "0.1", features = ["full"] }
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use settlex::prelude::*;
//!
//! let registry = Registry::with_defaults();
//! let spoke = registry.spoke_for_chain_id(84532).unwrap();
//!
//! let transfer = TransferRequest::new(1, 3, 1, receiver, amount);
//! let calldata = transfer.calldata()?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

// ============================================================================
// Component re-exports
// ============================================================================

/// Chain, token, and Spoke deployment registries
#[cfg(feature = "registry")]
#[cfg_attr(docsrs, doc(cfg(feature = "registry")))]
pub mod registry {
    pub use settlex_registry::*;
}

/// Spoke contract ABI and call construction
#[cfg(feature = "spoke")]
#[cfg_attr(docsrs, doc(cfg(feature = "spoke")))]
pub mod spoke {
    pub use settlex_spoke::*;
}

/// Wallet adapter, query cache, and RPC provider management
#[cfg(feature = "provider")]
#[cfg_attr(docsrs, doc(cfg(feature = "provider")))]
pub mod provider {
    pub use settlex_provider::*;
}

// ============================================================================
// Prelude - commonly used types
// ============================================================================

/// Prelude module for convenient imports
///
/// ```ignore
/// use settlex::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "registry")]
    pub use settlex_registry::prelude::*;

    #[cfg(feature = "spoke")]
    pub use settlex_spoke::prelude::*;

    #[cfg(feature = "provider")]
    pub use settlex_provider::{AdapterConfig, AppContext, QueryCache, WalletAdapter};
}

// ============================================================================
// Version information
// ============================================================================

/// Returns the SettleX SDK version
pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns the staged chain registry entries enabled at compile time
pub fn enabled_chains() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut chains = Vec::new();

    #[cfg(feature = "arbitrum")]
    chains.push("arbitrum");

    #[cfg(feature = "scroll")]
    chains.push("scroll");

    #[cfg(feature = "ethereum")]
    chains.push("ethereum");

    #[cfg(feature = "bsc")]
    chains.push("bsc");

    #[cfg(feature = "unichain")]
    chains.push("unichain");

    #[cfg(feature = "polygon")]
    chains.push("polygon");

    #[cfg(feature = "ronin")]
    chains.push("ronin");

    #[cfg(feature = "apechain")]
    chains.push("apechain");

    #[cfg(feature = "mode")]
    chains.push("mode");

    #[cfg(feature = "zircuit")]
    chains.push("zircuit");

    #[cfg(feature = "linea")]
    chains.push("linea");

    #[cfg(feature = "blast")]
    chains.push("blast");

    #[cfg(feature = "taiko")]
    chains.push("taiko");

    chains
}

// ============================================================================
// Tests
// ============================================================================
