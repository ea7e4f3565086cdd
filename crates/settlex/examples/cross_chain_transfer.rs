//! Cross-Chain Transfer Calldata Example
//!
//! Builds the `createTransaction` call a settlement sends to the Spoke
//! contract: USDT from Base Sepolia to Arbitrum, with every identifier
//! resolved from the bundled registries.
//!
//! Run with:
//! ```bash
//! cargo run -p settlex --example cross_chain_transfer
//! ```

use alloy::primitives::{address, U256};
use settlex::registry::Registry;
use settlex::spoke::{SpokeContract, TransferRequest};

fn main() {
    println!("━━━ SettleX Cross-Chain Transfer ━━━\n");

    let registry = Registry::with_defaults();

    // Source: the Spoke on Base Sepolia, resolved through the chain registry
    let source = registry
        .spoke_for_chain_id(84532)
        .expect("BASE Spoke deployment");

    // Destination: the Arbitrum Spoke, addressed by its protocol selector
    let destination = registry
        .spokes
        .by_chain("Arbitrum")
        .expect("Arbitrum Spoke deployment");

    // Token: USDT by display name
    let usdt = registry.tokens.by_name("USDT").expect("USDT entry");

    let receiver = address!("Ab5801a7D398351b8bE11C439e05C5B3259aeC9B");
    let amount = U256::from(25_000_000u64); // 25 USDT at 6 decimals

    let request = TransferRequest::new(
        source.selector,
        destination.selector,
        usdt.protocol_token_id,
        receiver,
        amount,
    );

    let calldata = request
        .calldata()
        .expect("Registry selectors fit in uint24");

    println!("Source:      {} (selector {})", source.chain, source.selector);
    println!(
        "Destination: {} (selector {})",
        destination.chain, destination.selector
    );
    println!(
        "Token:       {} (protocol id {})",
        usdt.name, usdt.protocol_token_id
    );
    println!("Receiver:    {receiver}");
    println!("Amount:      {amount} base units");
    println!();
    println!("Spoke contract: {}", source.address);
    println!(
        "Calldata ({} bytes): 0x{}",
        calldata.len(),
        alloy::hex::encode(&calldata)
    );
    println!();

    // Before settling, the Spoke must be approved to pull the token. The
    // allowance lives on the token contract with the Spoke as spender.
    let spoke = SpokeContract::new(source.address);
    let usdt_on_base = usdt
        .address_on(84532)
        .expect("USDT is deployed on Base Sepolia");
    println!("To check how much USDT the Spoke may pull, query:");
    println!(
        "  allowance(owner, {}) on token {}",
        spoke.address(),
        usdt_on_base
    );
}
