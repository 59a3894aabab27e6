//! # Commitments — Binding Subjects to Content Snapshots
//!
//! A [`Commitment`] is what the ledger records: which subject, and the
//! digest of the exact content that subject claims to represent. A
//! [`ContentRecord`] is what the off-chain store returns. Only recomputing
//! the record's digest and comparing it to the ledger commitment makes the
//! record trustworthy.
//!
//! ## Invariants
//!
//! - A commitment's digest is `sha256(jcs(payload))`, computed by the
//!   submitting party before any ledger write.
//! - Commitments have no setters. A changed submission is a new commitment.

use serde::{Deserialize, Serialize};

use crate::digest::{digest_payload, ContentDigest};
use crate::error::CanonicalizationError;
use crate::identity::{AccountAddress, ScholarshipId};
use crate::temporal::Timestamp;

/// The entity whose off-chain content a commitment binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Subject {
    /// Scholarship description, keyed by the ledger-issued id.
    Scholarship {
        /// Ledger-issued scholarship id.
        id: ScholarshipId,
    },
    /// One applicant's application to one scholarship.
    Application {
        /// Scholarship applied to.
        scholarship: ScholarshipId,
        /// Applicant account.
        applicant: AccountAddress,
    },
    /// A user's off-chain profile.
    Profile {
        /// Profile owner.
        account: AccountAddress,
    },
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scholarship { id } => write!(f, "scholarship:{id}"),
            Self::Application {
                scholarship,
                applicant,
            } => write!(f, "application:{scholarship}:{applicant}"),
            Self::Profile { account } => write!(f, "profile:{account}"),
        }
    }
}

/// A ledger commitment to a content snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    subject: Subject,
    digest: ContentDigest,
}

impl Commitment {
    /// Commit to `payload` on behalf of `subject`.
    ///
    /// # Errors
    ///
    /// Fails only if the payload cannot be canonicalized (e.g. contains floats).
    pub fn compute(
        subject: Subject,
        payload: &impl Serialize,
    ) -> Result<Self, CanonicalizationError> {
        Ok(Self {
            subject,
            digest: digest_payload(payload)?,
        })
    }

    /// Rebuild a commitment from a digest read back from the ledger.
    pub fn from_recorded(subject: Subject, digest: ContentDigest) -> Self {
        Self { subject, digest }
    }

    /// The committed subject.
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// The committed digest.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Recompute the digest of `payload` and compare it to this commitment.
    pub fn matches(&self, payload: &impl Serialize) -> Result<bool, CanonicalizationError> {
        Ok(digest_payload(payload)? == self.digest)
    }
}

/// Content as held by the off-chain store. Untrusted until reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord<T> {
    /// Subject the store claims this content belongs to.
    pub subject: Subject,
    /// The content itself.
    pub payload: T,
    /// When the store persisted the content, if it reports it.
    pub stored_at: Option<Timestamp>,
}

impl<T: Serialize> ContentRecord<T> {
    /// Digest of the payload as the store currently serves it.
    pub fn digest(&self) -> Result<ContentDigest, CanonicalizationError> {
        digest_payload(&self.payload)
    }
}
