//! # Trust Outcomes and Reconciled Views
//!
//! A view always carries the ledger's fields. Store content is attached
//! only when its digest matched the ledger commitment; otherwise the view
//! falls back to ledger-only fields and records why.

use grantee_core::{ContentDigest, Timestamp};
use grantee_ledger::{ApplicationRecord, ScholarshipRecord};
use grantee_store_client::{ScholarshipContent, StoreError};
use serde::Serialize;

/// Title shown when the store has no content for a committed subject.
pub const NOT_FOUND_TITLE: &str = "Scholarship Not Found";
/// Title shown when store content failed its integrity check.
pub const UNTRUSTED_TITLE: &str = "Content Failed Integrity Check";

/// Outcome of comparing store content to its ledger commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContentTrust {
    /// Recomputed digest equals the ledger digest.
    Trusted,
    /// The store returned nothing or could not be reached. Terminal; not
    /// retried.
    Unavailable {
        /// Why no content was obtained.
        cause: UnavailableCause,
    },
    /// The store served content that does not match the commitment.
    Mismatch {
        /// Digest recorded on the ledger.
        expected: ContentDigest,
        /// Digest of what the store served.
        actual: ContentDigest,
    },
}

/// Why the store produced no content to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnavailableCause {
    /// The store answered but holds nothing for the subject.
    NotFound,
    /// The request never completed: connect failure or timeout.
    Transport,
    /// The store answered with a non-2xx status other than 404.
    Status { status: u16 },
    /// The store answered 2xx with a body that is not a content document.
    Malformed,
    /// The client was misconfigured and no request was sent.
    Config,
}

impl From<&StoreError> for UnavailableCause {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::Http { .. } => Self::Transport,
            StoreError::ApiError { status: 404, .. } => Self::NotFound,
            StoreError::ApiError { status, .. } => Self::Status { status: *status },
            StoreError::Deserialization { .. } | StoreError::Malformed { .. } => Self::Malformed,
            StoreError::Config(_) => Self::Config,
        }
    }
}

impl std::fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("store has no content"),
            Self::Transport => f.write_str("store unreachable"),
            Self::Status { status } => write!(f, "store returned {status}"),
            Self::Malformed => f.write_str("store returned a malformed document"),
            Self::Config => f.write_str("store client misconfigured"),
        }
    }
}

impl ContentTrust {
    /// Trust outcome for a store read that produced no content.
    pub fn unavailable(cause: impl Into<UnavailableCause>) -> Self {
        Self::Unavailable {
            cause: cause.into(),
        }
    }

    /// Compare a recomputed digest against the ledger's.
    pub fn compare(expected: ContentDigest, actual: ContentDigest) -> Self {
        if expected == actual {
            Self::Trusted
        } else {
            Self::Mismatch { expected, actual }
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted)
    }
}

/// A scholarship reconciled across ledger and store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipView {
    /// Ledger-side fields: id, creator, balance, commitment.
    pub record: ScholarshipRecord,
    /// How the store content fared against the commitment.
    pub trust: ContentTrust,
    content: Option<ScholarshipContent>,
    /// Store-maintained applicant count, present only with trusted content.
    pub applicants: Option<u64>,
    /// When the store persisted the content, if reported.
    pub stored_at: Option<Timestamp>,
}

impl ScholarshipView {
    pub(crate) fn trusted(
        record: ScholarshipRecord,
        content: ScholarshipContent,
        applicants: u64,
        stored_at: Option<Timestamp>,
    ) -> Self {
        Self {
            record,
            trust: ContentTrust::Trusted,
            content: Some(content),
            applicants: Some(applicants),
            stored_at,
        }
    }

    pub(crate) fn ledger_only(record: ScholarshipRecord, trust: ContentTrust) -> Self {
        Self {
            record,
            trust,
            content: None,
            applicants: None,
            stored_at: None,
        }
    }

    /// Store content, present only when it matched the commitment.
    pub fn content(&self) -> Option<&ScholarshipContent> {
        self.content.as_ref()
    }

    /// Title to display: the trusted title, or a placeholder naming why
    /// there is none.
    pub fn display_title(&self) -> &str {
        match (&self.content, &self.trust) {
            (Some(content), _) => content.title.as_str(),
            (None, ContentTrust::Mismatch { .. }) => UNTRUSTED_TITLE,
            (None, _) => NOT_FOUND_TITLE,
        }
    }
}

/// One of the caller's applications, joined with its scholarship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub record: ApplicationRecord,
    /// `None` when the ledger itself has no such scholarship.
    pub scholarship: Option<ScholarshipView>,
}

impl ApplicationView {
    pub fn display_title(&self) -> &str {
        self.scholarship
            .as_ref()
            .map(ScholarshipView::display_title)
            .unwrap_or(NOT_FOUND_TITLE)
    }

    /// `Pending`, `Approved`, `Rejected` or `Cancelled`.
    pub fn status_label(&self) -> &'static str {
        self.record.status.as_str()
    }

    /// `Sent` or `Not Paid`.
    pub fn payment_label(&self) -> &'static str {
        self.record.payment_label()
    }
}
