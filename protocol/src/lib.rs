// Copyright (c) 2026 HyperLink Labs. MIT License.
// See LICENSE for details.

//! # HyperLink Protocol — Core Library
//!
//! A HyperLink is a URL whose fragment *is* a wallet: the bytes after `#`
//! deterministically re-derive an Ed25519 keypair, so anyone holding the
//! link controls the funds and nobody — including us — stores the secret
//! server-side. Losing the link is losing the money. Sharing the link is
//! sharing the money. That is the product, not a bug report.
//!
//! ## Architecture
//!
//! The modules mirror the actual pipeline, leaves first:
//!
//! - **config** — Protocol constants. Most of them are wire format; read
//!   the warnings before editing.
//! - **crypto** — Secret generation, the two seed-derivation policies,
//!   keypair expansion, and transfer-ID hashing.
//! - **link** — The versioned fragment codec: `(version, secret)` to
//!   fragment text and back, byte-exact and stable forever.
//! - **identity** — The `HyperLink` aggregate gluing the above together:
//!   `create`, `from_url`, `from_link`.
//! - **rotation** — Custody transfer: sweep a link's balance to a fresh
//!   successor through an external ledger client.
//!
//! ## Design Philosophy
//!
//! 1. Determinism is the contract: same fragment, same keypair, forever.
//! 2. Derivation is pure and synchronous; only the ledger boundary is async.
//! 3. Typed errors everywhere — a half-constructed identity does not exist.
//! 4. Secret and seed buffers are zeroed on drop; logs carry public keys only.

pub mod config;
pub mod crypto;
pub mod identity;
pub mod link;
pub mod rotation;
