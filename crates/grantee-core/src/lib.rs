//! # grantee-core — Foundational Types for the GranTEE Bridge
//!
//! The bridge connects two trust domains: a ledger that holds balances,
//! application status and content commitments, and an off-chain store that
//! holds the content itself. This crate defines the primitives both sides
//! agree on. Every other crate in the workspace depends on `grantee-core`;
//! it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest computation flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for digests.
//!    The submitting client and the off-chain store build payloads in
//!    different processes; sorted-key JCS output makes them agree.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every commitment is computed over canonical bytes.
//!
//! 3. **Newtypes for identifiers.** `ScholarshipId` and `AccountAddress`
//!    are distinct types; a `Subject` names exactly which entity a
//!    commitment binds.
//!
//! 4. **Commitments are immutable values.** A changed submission produces a
//!    new `Commitment`; there is no API that edits a digest in place.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `grantee-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod commitment;
pub mod digest;
pub mod error;
pub mod hex;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use commitment::{Commitment, ContentRecord, Subject};
pub use digest::{digest_payload, sha256_digest, sha256_hex, ContentDigest};
pub use error::{CanonicalizationError, GranteeError};
pub use identity::{AccountAddress, ScholarshipId};
pub use temporal::Timestamp;
