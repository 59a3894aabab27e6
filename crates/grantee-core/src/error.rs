//! # Error Types — Structured Error Hierarchy
//!
//! Errors raised by the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for `grantee-core`.
#[derive(Error, Debug)]
pub enum GranteeError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A digest could not be parsed.
    #[error("digest error: {0}")]
    Digest(#[from] DigestError),

    /// An identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A timestamp failed validation.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations; use string or integer for amount: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error parsing a hex-encoded digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// Wrong number of hex characters.
    #[error("digest hex must be {expected} chars, got {actual}")]
    InvalidLength {
        /// Expected hex length.
        expected: usize,
        /// Observed hex length.
        actual: usize,
    },

    /// Non-hex characters.
    #[error("digest is not valid hex: {0:?}")]
    InvalidHex(String),
}
