//! Spoke contract client
//!
//! Validates transfer fields, produces `createTransaction` calldata, and
//! reads ERC-20 allowances granted to the Spoke. Submitting the transaction
//! itself is the wallet's job; this client stops at the encoded bytes.

use crate::abi::{allowanceCall, createTransactionCall, CrossChainTransfer};
use crate::{Result, SpokeError, UINT24_MAX};
use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::sol_types::SolCall;

/// A cross-chain transfer before encoding
///
/// Selector and token id fields are plain `u32` here so callers can pass
/// registry values straight through; [`validate`](Self::validate) enforces
/// the payload's uint24 range before any conversion happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    /// Protocol selector of the source chain
    pub source_selector: u32,
    /// Protocol selector of the destination chain
    pub destination_selector: u32,
    /// Protocol token id of the asset to move
    pub protocol_token_id: u32,
    /// Recipient on the destination chain
    pub receiver: Address,
    /// Amount in the token's smallest unit
    pub amount: U256,
}

impl TransferRequest {
    /// Creates a new transfer request
    pub fn new(
        source_selector: u32,
        destination_selector: u32,
        protocol_token_id: u32,
        receiver: Address,
        amount: U256,
    ) -> Self {
        Self {
            source_selector,
            destination_selector,
            protocol_token_id,
            receiver,
            amount,
        }
    }

    /// Checks that every identifier fits the payload's uint24 fields
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("sourceChainSelector", self.source_selector),
            ("destinationChainSelector", self.destination_selector),
            ("protocolTokenId", self.protocol_token_id),
        ] {
            if value > UINT24_MAX {
                return Err(SpokeError::ValueOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Converts into the ABI payload struct
    pub fn to_payload(&self) -> Result<CrossChainTransfer> {
        self.validate()?;
        Ok(CrossChainTransfer {
            sourceChainSelector: U24::from(self.source_selector),
            destinationChainSelector: U24::from(self.destination_selector),
            protocolTokenId: U24::from(self.protocol_token_id),
            receiver: self.receiver,
            amount: self.amount,
        })
    }

    /// Encodes the full `createTransaction` calldata
    pub fn calldata(&self) -> Result<Vec<u8>> {
        let call = createTransactionCall {
            transaction_: self.to_payload()?,
        };
        Ok(call.abi_encode())
    }
}

/// Client for one Spoke deployment
#[derive(Debug, Clone)]
pub struct SpokeContract {
    /// The deployed Spoke address
    address: Address,
}

impl SpokeContract {
    /// Creates a client for a Spoke deployment
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Returns the Spoke address
    pub fn address(&self) -> Address {
        self.address
    }

    async fn call_at<C: SolCall>(&self, rpc_url: &str, to: Address, call: C) -> Result<C::Return> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse().map_err(|e| SpokeError::Provider(format!("{e}")))?);

        let call_data = call.abi_encode();
        let tx = alloy::rpc::types::TransactionRequest::default()
            .to(to)
            .input(call_data.into());

        let result = provider
            .call(tx)
            .await
            .map_err(|e| SpokeError::Contract(format!("{e}")))?;

        C::abi_decode_returns(&result)
            .map_err(|e| SpokeError::Contract(format!("Decode error: {e}")))
    }

    /// Reads `allowance(owner, spender)` on a token contract
    pub async fn allowance(
        &self,
        rpc_url: &str,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        self.call_at(rpc_url, token, allowanceCall { owner, spender })
            .await
    }

    /// Reads how much `owner` has approved this Spoke to spend of `token`
    pub async fn allowance_for_spoke(
        &self,
        rpc_url: &str,
        token: Address,
        owner: Address,
    ) -> Result<U256> {
        self.allowance(rpc_url, token, owner, self.address).await
    }
}


// ============================================================================
// Integration Tests (require network access)
// ============================================================================
