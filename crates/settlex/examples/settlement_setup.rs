//! Settlement Configuration Walkthrough
//!
//! Prints the bundled SettleX configuration: supported chains, settled
//! tokens, Spoke deployments, and the wallet networks the adapter serves.
//!
//! Run with:
//! ```bash
//! cargo run -p settlex --example settlement_setup
//! ```

use settlex::provider::{AdapterConfig, WalletAdapter, PROJECT_ID_ENV};
use settlex::registry::Registry;

#[tokio::main]
async fn main() {
    println!("╔════════════════════════════════════════════════════╗");
    println!("║        SettleX Settlement Configuration            ║");
    println!("╚════════════════════════════════════════════════════╝");
    println!();

    let registry = Registry::with_defaults();
    registry.validate().expect("Bundled registry must validate");

    println!("━━━ Chains ━━━");
    for chain in registry.chains.iter() {
        println!(
            "  {:<12} chain id {:>9}   logo {}",
            chain.name, chain.chain_id, chain.logo
        );
    }
    println!();

    println!("━━━ Tokens ━━━");
    for token in registry.tokens.iter() {
        println!(
            "  {:<8} protocol id {}   deployed on {} chain(s)",
            token.name,
            token.protocol_token_id,
            token.deployed_chains().len()
        );
    }
    println!();

    println!("━━━ Spoke Deployments ━━━");
    for spoke in registry.spokes.iter() {
        println!(
            "  {:<10} selector {}   at {}",
            spoke.chain, spoke.selector, spoke.address
        );
    }
    println!();

    // The adapter refuses to build without a wallet project id; fall back to
    // a demo id so the example runs out of the box.
    let config = match AdapterConfig::from_env() {
        Ok(config) => config,
        Err(_) => {
            println!("({PROJECT_ID_ENV} not set, using a demo project id)");
            AdapterConfig::new("demo-project-id")
        }
    };

    let adapter = WalletAdapter::new(config).expect("Failed to build wallet adapter");

    println!("━━━ Wallet Networks ━━━");
    for network in adapter.networks() {
        let marker = if network.chain_id == adapter.default_network().chain_id {
            "  (default)"
        } else {
            ""
        };
        println!(
            "  {:<18} chain id {:>9}{}",
            network.name, network.chain_id, marker
        );
    }
    println!();

    let session = adapter.session().current().await;
    println!(
        "Session starts on chain {} with account {:?}",
        session.chain_id, session.account
    );
}
