//! # SettleX Spoke
//!
//! Interface descriptor and call encoding for the SettleX Spoke contract.
//! The Spoke is the per-chain entry point of the settlement layer: the UI
//! submits a `CrossChainTransfer` payload through `createTransaction` and
//! checks ERC-20 allowances before doing so.
//!
//! This crate is the byte-level boundary with the deployed contracts. Field
//! order and integer widths in [`abi`] must match the on-chain encoder
//! exactly; everything else here is validation and plumbing around it.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use thiserror::Error;

pub mod abi;
pub mod client;

pub use abi::{allowanceCall, createTransactionCall, CrossChainTransfer};
pub use client::{SpokeContract, TransferRequest};

/// Largest value representable by the payload's uint24 identifier fields
pub const UINT24_MAX: u32 = 0xFF_FFFF;

/// Error type for Spoke operations
#[derive(Error, Debug)]
pub enum SpokeError {
    /// Provider construction or connection failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Contract call or decode failed
    #[error("Contract error: {0}")]
    Contract(String),

    /// A payload field does not fit in uint24
    #[error("{field} {value} exceeds the uint24 range")]
    ValueOutOfRange {
        /// Which payload field overflowed
        field: &'static str,
        /// The rejected value
        value: u32,
    },
}

/// Result type for Spoke operations
pub type Result<T> = std::result::Result<T, SpokeError>;

/// Exposes commonly used types when working with the Spoke contract.
pub mod prelude {
    pub use super::abi::CrossChainTransfer;
    pub use super::client::{SpokeContract, TransferRequest};
    pub use super::{SpokeError, UINT24_MAX};
}
