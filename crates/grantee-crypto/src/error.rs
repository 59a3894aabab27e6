//! # Cryptographic Error Types
//!
//! Structured errors for wallet signing and credential verification.

use grantee_core::AccountAddress;
use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Signature is not 65 bytes of `r || s || v`.
    #[error("invalid signature length: expected 65 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Signature bytes are structurally invalid (zero scalar, bad `v`).
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// No public key could be recovered from the signature.
    #[error("signature recovery failed: {0}")]
    RecoveryFailed(String),

    /// The signature was produced by a different account than claimed.
    #[error("signature was produced by {recovered}, not {claimed}")]
    AddressMismatch {
        /// Address the credential claims.
        claimed: AccountAddress,
        /// Address actually recovered from the signature.
        recovered: AccountAddress,
    },

    /// The credential signs a different message than the verifier expects.
    #[error("credential message does not match the expected challenge")]
    MessageMismatch,

    /// Signing itself failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_length_display() {
        let msg = CryptoError::InvalidSignatureLength(64).to_string();
        assert!(msg.contains("65 bytes"));
        assert!(msg.contains("64"));
    }

    #[test]
    fn address_mismatch_names_both_accounts() {
        let claimed = AccountAddress::from_bytes([1u8; 20]);
        let recovered = AccountAddress::from_bytes([2u8; 20]);
        let msg = CryptoError::AddressMismatch { claimed, recovered }.to_string();
        assert!(msg.contains(&claimed.to_string()));
        assert!(msg.contains(&recovered.to_string()));
    }
}
