//! CLI demo of the full HyperLink lifecycle.
//!
//! Walks through link creation, recovery from the shared URL, and a
//! balance rotation against an in-memory ledger. The output uses ANSI
//! escape codes for colored, storytelling-style terminal rendering.
//!
//! Run with:
//!   cargo run --example demo --release

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use hyperlink_protocol::config;
use hyperlink_protocol::crypto::keys::LinkPublicKey;
use hyperlink_protocol::identity::HyperLink;
use hyperlink_protocol::rotation::{rotate, LedgerClient, LedgerError, TransferTransaction};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Toy ledger: a map of Base58 addresses to lamport balances.
struct DemoLedger {
    balances: RwLock<HashMap<String, u64>>,
}

impl DemoLedger {
    fn new() -> Self {
        Self {
            balances: RwLock::new(HashMap::new()),
        }
    }

    fn fund(&self, key: &LinkPublicKey, lamports: u64) {
        self.balances.write().insert(key.to_base58(), lamports);
    }

    fn balance(&self, key: &LinkPublicKey) -> u64 {
        self.balances
            .read()
            .get(&key.to_base58())
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl LedgerClient for DemoLedger {
    async fn balance_of(&self, key: &LinkPublicKey) -> Result<u64, LedgerError> {
        Ok(self.balance(key))
    }

    async fn latest_blockhash(&self) -> Result<[u8; 32], LedgerError> {
        Ok([42u8; 32])
    }

    async fn submit_and_confirm(&self, transfer: &TransferTransaction) -> Result<(), LedgerError> {
        if !transfer.verify_signature() {
            return Err(LedgerError::Rejected("bad signature".into()));
        }
        let mut balances = self.balances.write();
        let from = transfer.from.to_base58();
        let available = balances.get(&from).copied().unwrap_or(0);
        let debit = transfer.lamports + config::ROTATION_FEE_LAMPORTS;
        if available < debit {
            return Err(LedgerError::Rejected("insufficient funds".into()));
        }
        balances.insert(from, available - debit);
        *balances.entry(transfer.to.to_base58()).or_insert(0) += transfer.lamports;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("{BOLD}HyperLink demo — a wallet that lives in a URL{RESET}\n");

    // 1. Mint a fresh link.
    let link = HyperLink::create(1)?;
    println!("{CYAN}1.{RESET} Created a v1 link:");
    println!("   {BOLD}{}{RESET}", link.url());
    println!("   address: {GREEN}{}{RESET}\n", link.public_key());

    // 2. Prove the link alone recovers the keypair.
    let recovered = HyperLink::from_link(link.url().as_str())?;
    assert_eq!(recovered.keypair(), link.keypair());
    println!("{CYAN}2.{RESET} Re-parsed the URL on a 'different machine':");
    println!("   derived the same address: {GREEN}{}{RESET}\n", recovered.public_key());

    // 3. Fund it and rotate custody to a fresh link.
    let ledger = DemoLedger::new();
    ledger.fund(&link.public_key(), 1_000_000);
    println!("{CYAN}3.{RESET} Funded with {YELLOW}1,000,000{RESET} lamports; rotating...");

    let receipt = rotate(&link, &ledger).await?;
    println!("   swept {YELLOW}{}{RESET} lamports (fee: {})", receipt.transferred, config::ROTATION_FEE_LAMPORTS);
    println!("   tx {DIM}{}{RESET}", receipt.transaction_id);
    println!("   successor link: {BOLD}{}{RESET}", receipt.new_link.url());
    println!(
        "   old balance: {}, new balance: {}\n",
        ledger.balance(&link.public_key()),
        ledger.balance(&receipt.new_link.public_key())
    );

    println!("{GREEN}{BOLD}Done.{RESET} The old link still parses — it just owns nothing now.");
    Ok(())
}
