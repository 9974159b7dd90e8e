// Copyright (c) 2026 HyperLink Labs. MIT License.
// See LICENSE for details.

//! # HyperLink CLI
//!
//! Entry point for the `hyperlink` binary. Parses CLI arguments,
//! initializes logging, and dispatches to the protocol library.
//!
//! The binary supports three subcommands:
//!
//! - `create`  — mint a fresh link wallet
//! - `inspect` — re-derive the address behind an existing link
//! - `version` — print build version information
//!
//! Deliverables go to stdout; logs go to stderr. The URL printed by
//! `create` is the private key — nothing here persists it anywhere.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use hyperlink_protocol::identity::HyperLink;

use cli::{Commands, CreateArgs, HyperLinkCli, InspectArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let args = HyperLinkCli::parse();
    logging::init_logging("info", LogFormat::from_str_lossy(&args.log_format));

    match args.command {
        Commands::Create(args) => create(args),
        Commands::Inspect(args) => inspect(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Mint a fresh link and print it exactly once.
fn create(args: CreateArgs) -> Result<()> {
    let link = HyperLink::create(args.link_version)
        .with_context(|| format!("creating a version-{} link", args.link_version))?;

    tracing::info!(version = args.link_version, address = %link.public_key(), "minted link");

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "version": args.link_version,
                "url": link.url().as_str(),
                "address": link.public_key().to_base58(),
            })
        );
    } else {
        println!("link:    {}", link.url());
        println!("address: {}", link.public_key());
        eprintln!("\nThis URL is the only copy of the key. Store it like money.");
    }
    Ok(())
}

/// Parse a link and print the address it controls.
fn inspect(args: InspectArgs) -> Result<()> {
    let link = HyperLink::from_link(&args.link).context("parsing link")?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "address": link.public_key().to_base58(),
            })
        );
    } else {
        println!("address: {}", link.public_key());
    }
    Ok(())
}

/// Print build version information.
fn print_version() {
    println!("hyperlink {}", env!("CARGO_PKG_VERSION"));
}
