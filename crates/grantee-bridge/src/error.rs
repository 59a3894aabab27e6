//! Bridge error taxonomy.

use grantee_core::{CanonicalizationError, ContentDigest, Subject};
use grantee_crypto::CryptoError;
use grantee_ledger::LedgerError;
use grantee_store_client::StoreError;
use thiserror::Error;

/// Failures reported by a [`crate::WalletAgent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the signature request.
    #[error("signature request declined")]
    Declined,
    /// The wallet does not control the requested account.
    #[error("wallet does not control {0}")]
    UnknownAccount(grantee_core::AccountAddress),
    /// The wallet could not be reached.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    /// The wallet failed to produce a signature.
    #[error("wallet signing failed: {0}")]
    Signing(#[from] CryptoError),
}

/// Errors from bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No account is connected. Raised before any network call.
    #[error("no wallet account is connected")]
    Unauthenticated,

    /// The wallet did not produce a signature.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// A signature did not verify against the claimed account.
    #[error("credential verification failed: {0}")]
    Credential(#[from] CryptoError),

    /// A ledger call failed or was refused.
    #[error("ledger call failed: {0}")]
    LedgerCallFailed(#[from] LedgerError),

    /// A store call failed. Never raised after a successful ledger write.
    #[error("store call failed: {0}")]
    StoreCallFailed(#[from] StoreError),

    /// The ledger write succeeded but the off-chain write did not. Retry only
    /// the off-chain leg for `subject`.
    #[error("{subject} committed as {digest}, but the store write failed: {source}")]
    PartialWrite {
        /// Subject already recorded on the ledger.
        subject: Subject,
        /// Digest already recorded on the ledger.
        digest: ContentDigest,
        /// The store failure.
        source: StoreError,
    },

    /// Content offered for an off-chain write does not match the ledger.
    #[error("content for {subject} hashes to {actual}, ledger holds {expected}")]
    ContentMismatch {
        /// Subject whose commitment was checked.
        subject: Subject,
        /// Digest on the ledger.
        expected: ContentDigest,
        /// Digest of the offered content.
        actual: ContentDigest,
    },

    /// An application essay is below the minimum length.
    #[error("essay has {words} words; at least {minimum} are required")]
    EssayTooShort {
        /// Words in the essay.
        words: usize,
        /// Required minimum.
        minimum: usize,
    },

    /// Content could not be canonicalized for hashing.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}

impl BridgeError {
    /// The subject already committed on the ledger, if this is a partial
    /// write.
    pub fn committed_subject(&self) -> Option<Subject> {
        match self {
            Self::PartialWrite { subject, .. } => Some(*subject),
            _ => None,
        }
    }
}
