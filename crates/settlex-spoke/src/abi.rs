//! Spoke contract ABI
//!
//! Mirrors the deployed Spoke interface. Parameter order, tuple field order,
//! and integer widths are contract: changing any of them breaks the on-chain
//! encoding.

use alloy::sol;

// Define the Spoke payload struct and function selectors using sol!
sol! {
    struct CrossChainTransfer {
        uint24 sourceChainSelector;
        uint24 destinationChainSelector;
        uint24 protocolTokenId;
        address receiver;
        uint256 amount;
    }

    function createTransaction(CrossChainTransfer transaction_) external;
    function allowance(address owner, address spender) external view returns (uint256);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::aliases::U24;
    use alloy::primitives::{address, U256};
    use alloy::sol_types::SolCall;

    // ============================================================================
    // Selector Tests
    // ============================================================================

    #[test]
    fn test_create_transaction_signature() {
        assert_eq!(
            createTransactionCall::SIGNATURE,
            "createTransaction((uint24,uint24,uint24,address,uint256))"
        );
    }

    #[test]
    fn test_create_transaction_selector() {
        // keccak256 of the canonical signature, first four bytes
        assert_eq!(createTransactionCall::SELECTOR, [0xcc, 0xd2, 0x53, 0xd6]);
    }

    #[test]
    fn test_allowance_signature() {
        assert_eq!(allowanceCall::SIGNATURE, "allowance(address,address)");
    }

    #[test]
    fn test_allowance_selector() {
        // Standard ERC-20 allowance selector
        assert_eq!(allowanceCall::SELECTOR, [0xdd, 0x62, 0xed, 0x3e]);
    }

    // ============================================================================
    // Call Encoding Tests
    // ============================================================================

    #[test]
    fn test_create_transaction_call_encoding() {
        let transfer = CrossChainTransfer {
            sourceChainSelector: U24::from(1u8),
            destinationChainSelector: U24::from(2u8),
            protocolTokenId: U24::from(1u8),
            receiver: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            amount: U256::from(1_000_000u64),
        };
        let call = createTransactionCall { transaction_: transfer };
        let encoded = call.abi_encode();

        assert_eq!(&encoded[0..4], &[0xcc, 0xd2, 0x53, 0xd6]);
        // 4 selector + 5 static tuple fields of 32 bytes each
        assert_eq!(encoded.len(), 164);
    }

    #[test]
    fn test_create_transaction_word_layout() {
        let transfer = CrossChainTransfer {
            sourceChainSelector: U24::from(1u8),
            destinationChainSelector: U24::from(2u8),
            protocolTokenId: U24::from(3u8),
            receiver: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            amount: U256::from(7u8),
        };
        let encoded = createTransactionCall { transaction_: transfer }.abi_encode();
        let words: Vec<&[u8]> = encoded[4..].chunks(32).collect();
        assert_eq!(words.len(), 5);

        // uint24 fields are right-aligned in their words
        assert_eq!(words[0][31], 1); // sourceChainSelector
        assert_eq!(words[1][31], 2); // destinationChainSelector
        assert_eq!(words[2][31], 3); // protocolTokenId
        // address occupies the low 20 bytes of word 3
        assert_eq!(
            &words[3][12..],
            address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045").as_slice()
        );
        assert_eq!(words[4][31], 7); // amount
    }

    #[test]
    fn test_create_transaction_decode_round_trip() {
        let transfer = CrossChainTransfer {
            sourceChainSelector: U24::from(1u8),
            destinationChainSelector: U24::from(6u8),
            protocolTokenId: U24::from(1u8),
            receiver: address!("0b8C9Cf4F43811D9A22Be732AbE81617D4BD4183"),
            amount: U256::from(250_000_000u64),
        };
        let encoded = createTransactionCall { transaction_: transfer }.abi_encode();

        let decoded = createTransactionCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.transaction_.sourceChainSelector, U24::from(1u8));
        assert_eq!(decoded.transaction_.destinationChainSelector, U24::from(6u8));
        assert_eq!(decoded.transaction_.protocolTokenId, U24::from(1u8));
        assert_eq!(
            decoded.transaction_.receiver,
            address!("0b8C9Cf4F43811D9A22Be732AbE81617D4BD4183")
        );
        assert_eq!(decoded.transaction_.amount, U256::from(250_000_000u64));
    }

    #[test]
    fn test_uint24_max_encodes() {
        let transfer = CrossChainTransfer {
            sourceChainSelector: U24::MAX,
            destinationChainSelector: U24::MAX,
            protocolTokenId: U24::MAX,
            receiver: address!("0000000000000000000000000000000000000001"),
            amount: U256::MAX,
        };
        let encoded = createTransactionCall { transaction_: transfer }.abi_encode();
        let words: Vec<&[u8]> = encoded[4..].chunks(32).collect();
        // 0xFFFFFF right-aligned
        assert_eq!(&words[0][29..], &[0xFF, 0xFF, 0xFF]);
        assert_eq!(&words[0][..29], &[0u8; 29]);
    }

    #[test]
    fn test_allowance_call_encoding() {
        let owner = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let spender = address!("91e2E34718EFD173389c7876BBBb57594cE27e37");
        let call = allowanceCall { owner, spender };
        let encoded = call.abi_encode();

        assert_eq!(&encoded[0..4], &[0xdd, 0x62, 0xed, 0x3e]);
        // 4 selector + 32 owner + 32 spender
        assert_eq!(encoded.len(), 68);

        // Parameter order: owner before spender
        assert_eq!(&encoded[16..36], owner.as_slice());
        assert_eq!(&encoded[48..68], spender.as_slice());
    }
}
