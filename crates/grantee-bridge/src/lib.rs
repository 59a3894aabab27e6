//! # grantee-bridge — Ledger ↔ Store Integrity and Authentication
//!
//! The ledger is authoritative and immutable; the off-chain store is
//! mutable and untrusted. This crate connects the two:
//!
//! - [`SignatureAuthenticator`] turns the injected [`WalletAgent`] into
//!   per-request [`grantee_crypto::Credential`]s.
//! - [`Reconciler`] commits content (digest on the ledger, content in the
//!   store) and, on read, recomputes digests to decide whether store content
//!   can be trusted.
//! - [`ProfileSync`] reads and writes signed user profiles.
//! - [`ScholarshipAdmin`] performs the ledger-only scholarship lifecycle and
//!   review operations on behalf of the connected account.
//!
//! ## Failure Model
//!
//! Nothing here retries. Integrity outcomes ([`ContentTrust`]) are values,
//! not errors: unavailable and tampered content are both valid states the
//! caller renders. A store failure after a successful ledger write is a
//! [`BridgeError::PartialWrite`] carrying the already-issued subject.

pub mod admin;
pub mod authenticator;
pub mod error;
pub mod profile;
pub mod reconciler;
pub mod trust;
pub mod wallet;

pub use admin::ScholarshipAdmin;
pub use authenticator::SignatureAuthenticator;
pub use error::{BridgeError, WalletError};
pub use profile::ProfileSync;
pub use reconciler::{Reconciler, MIN_ESSAY_WORDS};
pub use trust::{ApplicationView, ContentTrust, ScholarshipView, UnavailableCause};
pub use wallet::{LocalWallet, WalletAgent};
