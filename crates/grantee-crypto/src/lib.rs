//! # grantee-crypto — Wallet Signature Primitives
//!
//! Accounts on the ledger are secp256k1 keys. This crate provides:
//!
//! - **EIP-191 personal-message signing**: the `"\x19Ethereum Signed Message:\n"`
//!   prefix, Keccak-256, and 65-byte `r || s || v` signatures, byte-compatible
//!   with browser wallets.
//! - **Address recovery**: the signer's address is recovered from the
//!   signature alone, so the off-chain store authenticates a caller without
//!   holding any secret.
//! - **`Credential`**: an ephemeral `{account, message, signature}` triple,
//!   built per request and never persisted.
//!
//! ## Crate Policy
//!
//! - Depends only on `grantee-core` internally.
//! - Private keys are never serialized or logged.
//! - No mocking of cryptographic operations in tests: all tests use real
//!   secp256k1 and Keccak-256.

pub mod credential;
pub mod eip191;
pub mod error;

pub use credential::Credential;
pub use eip191::{address_of, eip191_hash, keccak256, recover_address, WalletKey, WalletSignature};
pub use error::CryptoError;
