//! # CLI Interface
//!
//! Defines the command-line argument structure for `hyperlink` using
//! `clap` derive. Three subcommands: `create`, `inspect`, and `version`.

use clap::{Parser, Subcommand};

/// HyperLink operator tool.
///
/// Mints link wallets and inspects existing ones. A created link is printed
/// once, to stdout, and nowhere else — there is no server-side copy, so
/// whatever you do with that line of output is the custody model.
#[derive(Parser, Debug)]
#[command(
    name = "hyperlink",
    about = "Mint and inspect HyperLink link wallets",
    version,
    propagate_version = true
)]
pub struct HyperLinkCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, global = true, env = "HYPERLINK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `hyperlink` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint a fresh link wallet and print its URL and address.
    Create(CreateArgs),
    /// Re-derive and print the address a link controls.
    Inspect(InspectArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `create` subcommand.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Link version to mint: 0 (Argon2id-hardened 12-byte secret) or
    /// 1 (unhardened 16-byte secret).
    #[arg(long, short = 'v', default_value_t = 0)]
    pub link_version: u8,

    /// Emit machine-readable JSON instead of human-oriented lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// The full link text, fragment included.
    pub link: String,

    /// Emit machine-readable JSON instead of human-oriented lines.
    #[arg(long)]
    pub json: bool,
}
