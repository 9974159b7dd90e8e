//! # Link Rotation
//!
//! A link cannot be revoked — the secret is in the URL, and the URL is
//! wherever it has been pasted. The only way to retire one is to drain it:
//! mint a fresh link, sweep the full balance minus the network fee to it,
//! and hand the new link to the owner. That custody transfer is what this
//! module implements.
//!
//! The actual ledger is an external collaborator behind the
//! [`LedgerClient`] trait: balance queries, blockhash fetches, and
//! submit-and-confirm are its problem, retry policy included. This module
//! owns the protocol around it — fee arithmetic, successor creation,
//! transfer construction and signing — and it owns one presentation rule:
//! the successor link is not surfaced until confirmation succeeds, so a
//! caller never advertises a link whose funds did not arrive.
//!
//! Confirmation failures are recoverable, not invariant violations. A
//! concurrent rotation may have drained the source first (the ledger's
//! blockhash mechanism guarantees at most one sweep wins); the correct
//! response is to re-query the balance and report, never to retry blindly
//! against state we no longer believe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::crypto::hash::double_sha256;
use crate::crypto::keys::{LinkKeypair, LinkPublicKey, LinkSignature};
use crate::identity::{HyperLink, LinkError};

/// Errors surfaced by the external ledger collaborator.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The RPC endpoint could not be reached or returned garbage.
    #[error("ledger transport error: {0}")]
    Transport(String),

    /// The ledger rejected the transaction outright.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// Submission went through but confirmation never arrived.
    #[error("confirmation failed: {0}")]
    ConfirmationFailed(String),
}

/// Errors that can occur during a rotation attempt.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The balance does not cover the network fee; nothing to sweep.
    /// Raised before any transaction is constructed or submitted.
    #[error("insufficient balance to rotate: {balance} lamports <= fee of {fee}")]
    InsufficientBalance {
        /// The source balance the caller supplied.
        balance: u64,
        /// The fee that would be consumed by the sweep.
        fee: u64,
    },

    /// Creating the successor identity failed.
    #[error(transparent)]
    Link(#[from] LinkError),

    /// The ledger collaborator failed. Recoverable: re-query the balance
    /// and try again — the old link is untouched.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Black-box capabilities the rotation protocol consumes from a ledger.
///
/// Implementations bring their own transport, retries, and timeouts. The
/// mock in the integration tests is the only implementation this crate
/// ships; wiring a real RPC client is the embedder's job.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current balance of `key`'s account, in lamports.
    async fn balance_of(&self, key: &LinkPublicKey) -> Result<u64, LedgerError>;

    /// A recent blockhash to anchor a transaction to.
    async fn latest_blockhash(&self) -> Result<[u8; 32], LedgerError>;

    /// Submit a signed transfer and wait for confirmation.
    async fn submit_and_confirm(&self, transfer: &TransferTransaction) -> Result<(), LedgerError>;
}

/// A single-instruction transfer: move `lamports` from `from` to `to`.
///
/// The `id` is `hex(double_sha256(signable_bytes))`, computed at
/// construction and stable across signing — signature bytes are excluded
/// from the canonical serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTransaction {
    /// Stable transaction identifier.
    pub id: String,

    /// Sender (the link being drained). Pays the fee.
    pub from: LinkPublicKey,

    /// Receiver (the successor link).
    pub to: LinkPublicKey,

    /// Amount moved, in lamports. The fee is charged on top by the ledger.
    pub lamports: u64,

    /// Recent blockhash anchoring the transaction's validity window and
    /// enforcing at-most-one-spend among racing sweeps.
    pub recent_blockhash: [u8; 32],

    /// Ed25519 signature over [`Self::signable_bytes`], hex-encoded.
    /// `None` until [`Self::sign`] runs.
    pub signature: Option<String>,
}

impl TransferTransaction {
    /// Construct an unsigned transfer and compute its ID.
    pub fn new(
        from: LinkPublicKey,
        to: LinkPublicKey,
        lamports: u64,
        recent_blockhash: [u8; 32],
    ) -> Self {
        let mut tx = Self {
            id: String::new(),
            from,
            to,
            lamports,
            recent_blockhash,
            signature: None,
        };
        tx.id = hex::encode(double_sha256(&tx.signable_bytes()));
        tx
    }

    /// Canonical bytes covered by the ID and the signature: sender key,
    /// receiver key, little-endian amount, blockhash. Fixed-width fields,
    /// no separators needed, no serde involvement — field order in a
    /// struct is not a wire contract.
    pub fn signable_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(104);
        buf.extend_from_slice(self.from.as_bytes());
        buf.extend_from_slice(self.to.as_bytes());
        buf.extend_from_slice(&self.lamports.to_le_bytes());
        buf.extend_from_slice(&self.recent_blockhash);
        buf
    }

    /// Sign in place with the sender's keypair and return the signature.
    pub fn sign(&mut self, keypair: &LinkKeypair) -> LinkSignature {
        let signature = keypair.sign(&self.signable_bytes());
        self.signature = Some(signature.to_hex());
        signature
    }

    /// Whether a signature is attached.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Verify the attached signature against the `from` key.
    ///
    /// `false` for unsigned transactions or any malformed signature —
    /// fail closed, no panics.
    pub fn verify_signature(&self) -> bool {
        let Some(hex_sig) = &self.signature else {
            return false;
        };
        let Ok(signature) = LinkSignature::from_hex(hex_sig) else {
            return false;
        };
        self.from.verify(&self.signable_bytes(), &signature)
    }
}

/// Everything a caller needs after a successful rotation.
///
/// Holding a receipt means confirmation succeeded: the successor is live
/// and the old link is drained. The old link's materials remain valid
/// forever — it just controls dust.
pub struct RotationReceipt {
    /// The successor identity now holding the funds.
    pub new_link: HyperLink,

    /// Lamports actually moved (`balance - fee`).
    pub transferred: u64,

    /// ID of the confirmed sweep transaction.
    pub transaction_id: String,

    /// Hex-encoded signature of the confirmed sweep.
    pub signature: String,
}

impl std::fmt::Debug for RotationReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // new_link's URL is secret material; expose its public key only.
        f.debug_struct("RotationReceipt")
            .field("new_link", &self.new_link)
            .field("transferred", &self.transferred)
            .field("transaction_id", &self.transaction_id)
            .finish()
    }
}

/// The sweep amount for a given balance and fee.
///
/// Pure arithmetic, checked before anything else happens: a balance at or
/// below the fee has nothing to move and must be rejected before a
/// transaction exists, not submitted as a zero transfer.
pub fn sweep_amount(balance: u64, fee: u64) -> Result<u64, RotationError> {
    if balance <= fee {
        return Err(RotationError::InsufficientBalance { balance, fee });
    }
    Ok(balance - fee)
}

/// Rotate with a fresh balance query and the standard network fee
/// ([`config::ROTATION_FEE_LAMPORTS`]).
///
/// Convenience wrapper over [`rotate_with_fee`] for callers that are not
/// already polling the balance.
pub async fn rotate<C>(old: &HyperLink, client: &C) -> Result<RotationReceipt, RotationError>
where
    C: LedgerClient + ?Sized,
{
    let balance = client.balance_of(&old.public_key()).await?;
    rotate_with_fee(old, balance, config::ROTATION_FEE_LAMPORTS, client).await
}

/// Sweep `old`'s balance (minus `fee`) to a freshly created v0 link.
///
/// `balance` is the caller's current view of the source account — callers
/// are already polling it for display. Using the supplied value keeps the
/// insufficient-balance rejection free of network calls; if the view was
/// stale because a racing sweep won, the ledger rejects the transfer and
/// the error comes back as recoverable [`RotationError::Ledger`].
///
/// The successor exists in memory before any network traffic, but it is
/// only released to the caller inside the receipt, after confirmation.
pub async fn rotate_with_fee<C>(
    old: &HyperLink,
    balance: u64,
    fee: u64,
    client: &C,
) -> Result<RotationReceipt, RotationError>
where
    C: LedgerClient + ?Sized,
{
    let transferred = sweep_amount(balance, fee)?;

    let new_link = HyperLink::create(0)?;
    let recent_blockhash = client.latest_blockhash().await?;

    let mut transfer = TransferTransaction::new(
        old.public_key(),
        new_link.public_key(),
        transferred,
        recent_blockhash,
    );
    let signature = transfer.sign(old.keypair());

    client.submit_and_confirm(&transfer).await?;

    tracing::info!(
        from = %old.public_key(),
        to = %new_link.public_key(),
        transferred,
        transaction_id = %transfer.id,
        "rotation confirmed"
    );

    Ok(RotationReceipt {
        new_link,
        transferred,
        transaction_id: transfer.id,
        signature: signature.to_hex(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::entropy::Secret;
    use crate::crypto::kdf::derive_seed;
    use crate::link::version::LinkVersion;

    fn keypair(tag: u8) -> LinkKeypair {
        let seed = derive_seed(&Secret::from_bytes(vec![tag; 16]), LinkVersion::V1).unwrap();
        LinkKeypair::from_seed(&seed)
    }

    #[test]
    fn sweep_amount_subtracts_the_fee() {
        assert_eq!(sweep_amount(10_000, 5_000).unwrap(), 5_000);
    }

    #[test]
    fn sweep_rejects_balance_below_fee() {
        let err = sweep_amount(4_000, 5_000).unwrap_err();
        assert!(matches!(
            err,
            RotationError::InsufficientBalance { balance: 4_000, fee: 5_000 }
        ));
    }

    #[test]
    fn sweep_rejects_balance_equal_to_fee() {
        // Exactly the fee leaves zero to move; a zero transfer is not a sweep.
        assert!(sweep_amount(5_000, 5_000).is_err());
    }

    #[test]
    fn transfer_id_is_stable_across_signing() {
        let mut tx = TransferTransaction::new(
            keypair(1).public_key(),
            keypair(2).public_key(),
            5_000,
            [9u8; 32],
        );
        let id_before = tx.id.clone();
        tx.sign(&keypair(1));
        assert_eq!(tx.id, id_before);
        assert!(tx.is_signed());
    }

    #[test]
    fn transfer_signature_verifies_against_sender() {
        let sender = keypair(1);
        let mut tx = TransferTransaction::new(
            sender.public_key(),
            keypair(2).public_key(),
            7_777,
            [3u8; 32],
        );
        assert!(!tx.verify_signature());
        tx.sign(&sender);
        assert!(tx.verify_signature());
    }

    #[test]
    fn signature_by_wrong_key_fails_verification() {
        let mut tx = TransferTransaction::new(
            keypair(1).public_key(),
            keypair(2).public_key(),
            7_777,
            [3u8; 32],
        );
        tx.sign(&keypair(2));
        assert!(!tx.verify_signature());
    }

    #[test]
    fn tampered_amount_invalidates_signature() {
        let sender = keypair(1);
        let mut tx = TransferTransaction::new(
            sender.public_key(),
            keypair(2).public_key(),
            5_000,
            [3u8; 32],
        );
        tx.sign(&sender);
        tx.lamports = 50_000;
        assert!(!tx.verify_signature());
    }

    #[test]
    fn distinct_transfers_get_distinct_ids() {
        let a = TransferTransaction::new(
            keypair(1).public_key(),
            keypair(2).public_key(),
            1,
            [0u8; 32],
        );
        let b = TransferTransaction::new(
            keypair(1).public_key(),
            keypair(2).public_key(),
            2,
            [0u8; 32],
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn signable_bytes_layout() {
        let from = keypair(1).public_key();
        let to = keypair(2).public_key();
        let tx = TransferTransaction::new(from, to, 0x0102030405060708, [0xAA; 32]);
        let bytes = tx.signable_bytes();
        assert_eq!(bytes.len(), 104);
        assert_eq!(&bytes[..32], from.as_bytes());
        assert_eq!(&bytes[32..64], to.as_bytes());
        assert_eq!(&bytes[64..72], &0x0102030405060708u64.to_le_bytes());
        assert_eq!(&bytes[72..], &[0xAA; 32]);
    }
}
