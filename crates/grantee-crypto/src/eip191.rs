//! # EIP-191 Personal-Message Signatures
//!
//! Signing and recovery compatible with `personal_sign` in browser wallets.
//!
//! ## Construction
//!
//! ```text
//! hash      = keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)
//! signature = r (32) || s (32) || v (1),   v = 27 + recovery_id
//! address   = keccak256(uncompressed_pubkey[1..])[12..]
//! ```
//!
//! `len(message)` is the decimal byte length of the UTF-8 message.
//!
//! ## Security Invariant
//!
//! - `WalletKey` does not implement `Serialize`, and its `Debug` output
//!   never contains key material. Construction from hex goes through
//!   `Zeroizing` buffers.
//! - Signatures are always low-S. High-S signatures from other signers are
//!   normalized before recovery so the same logical signature recovers the
//!   same address.
//!
//! ## Serde
//!
//! `WalletSignature` serializes as a `0x`-prefixed 130-character hex string,
//! the form wallets return and the off-chain store expects.

use grantee_core::hex::{decode_fixed, encode as bytes_to_hex};
use grantee_core::AccountAddress;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use zeroize::Zeroizing;

use crate::error::CryptoError;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Keccak-256 (the pre-standard SHA-3 padding used by the ledger).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// The EIP-191 version `0x45` hash of a personal message.
pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX);
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Derive the ledger address of a secp256k1 public key.
pub fn address_of(verifying_key: &VerifyingKey) -> AccountAddress {
    let point = verifying_key.to_encoded_point(false);
    // Uncompressed SEC1: 0x04 || X (32) || Y (32).
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    AccountAddress::from_bytes(bytes)
}

// ---------------------------------------------------------------------------
// WalletSignature
// ---------------------------------------------------------------------------

/// A 65-byte recoverable signature: `r || s || v` with `v ∈ {27, 28}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalletSignature([u8; 65]);

impl WalletSignature {
    /// Build from raw bytes, normalizing `v` from `{0, 1}` to `{27, 28}`.
    pub fn from_bytes(bytes: [u8; 65]) -> Result<Self, CryptoError> {
        let mut bytes = bytes;
        bytes[64] = match bytes[64] {
            0 | 1 => bytes[64] + 27,
            27 | 28 => bytes[64],
            v => {
                return Err(CryptoError::MalformedSignature(format!(
                    "recovery byte must be 0, 1, 27 or 28, got {v}"
                )))
            }
        };
        Ok(Self(bytes))
    }

    /// Build from a byte slice that must be exactly 65 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 65] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Self::from_bytes(arr)
    }

    /// The raw 65 signature bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", bytes_to_hex(&self.0))
    }

    /// Parse from hex with or without `0x`.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let trimmed = hex.trim();
        let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if body.len() != 130 {
            return Err(CryptoError::InvalidSignatureLength(body.len() / 2));
        }
        let bytes = decode_fixed::<65>(body).map_err(CryptoError::HexDecode)?;
        Self::from_bytes(bytes)
    }

    fn split(&self) -> Result<(Signature, RecoveryId), CryptoError> {
        let signature = Signature::from_slice(&self.0[..64])
            .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;
        let recovery_id = RecoveryId::from_byte(self.0[64] - 27)
            .ok_or_else(|| CryptoError::MalformedSignature("bad recovery id".into()))?;
        // Recovery only accepts low-S; the same point is recovered with the
        // y-parity flipped.
        match signature.normalize_s() {
            Some(low) => Ok((
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            )),
            None => Ok((signature, recovery_id)),
        }
    }
}

impl Serialize for WalletSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WalletSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletSignature({}...)", bytes_to_hex(&self.0[..4]))
    }
}

impl std::fmt::Display for WalletSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// WalletKey
// ---------------------------------------------------------------------------

/// A secp256k1 account key that signs personal messages.
///
/// Does not implement `Serialize`: private keys must not be accidentally
/// serialized into logs, responses, or artifacts.
#[derive(Clone)]
pub struct WalletKey {
    signing_key: SigningKey,
}

impl WalletKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { signing_key }
    }

    /// Create a key from a raw 32-byte secret scalar.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(secret).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self { signing_key })
    }

    /// Parse a key from 64 hex characters, with or without `0x`.
    pub fn from_hex(hex: &str) -> Result<Self, CryptoError> {
        let trimmed = hex.trim();
        let body = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        if body.len() != 64 {
            return Err(CryptoError::InvalidKey(format!(
                "private key hex must be 64 chars, got {}",
                body.len()
            )));
        }
        let secret = Zeroizing::new(decode_fixed::<32>(body).map_err(CryptoError::HexDecode)?);
        Self::from_bytes(&secret)
    }

    /// The secret scalar as 64 hex characters, without `0x`. Only for
    /// writing a freshly generated key to disk.
    pub fn to_secret_hex(&self) -> Zeroizing<String> {
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&self.signing_key.to_bytes());
        Zeroizing::new(bytes_to_hex(secret.as_ref()))
    }

    /// The ledger address controlled by this key.
    pub fn address(&self) -> AccountAddress {
        address_of(self.signing_key.verifying_key())
    }

    /// Sign `message` as an EIP-191 personal message.
    pub fn sign_message(&self, message: &str) -> Result<WalletSignature, CryptoError> {
        let prehash = eip191_hash(message.as_bytes());
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(&prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = 27 + recovery_id.to_byte();
        WalletSignature::from_bytes(bytes)
    }
}

impl std::fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WalletKey(<private>, {})", self.address())
    }
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// Recover the address that signed `message`.
///
/// Any well-formed signature recovers *some* address; callers must compare
/// the result with the address they expect.
pub fn recover_address(
    message: &str,
    signature: &WalletSignature,
) -> Result<AccountAddress, CryptoError> {
    let prehash = eip191_hash(message.as_bytes());
    let (sig, recovery_id) = signature.split()?;
    let verifying_key = VerifyingKey::recover_from_prehash(&prehash, &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
    Ok(address_of(&verifying_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference key and vector published with the web3.js accounts docs.
    const REF_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const REF_ADDRESS: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";
    const REF_HASH: &str = "1da44b586eb0729ff70a73c326926f6ed5a25f5b056e7f47fbc6e58d86871655";
    const REF_SIGNATURE: &str = "0xb91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a0291c";

    fn ref_key() -> WalletKey {
        WalletKey::from_hex(REF_KEY).unwrap()
    }

    #[test]
    fn keccak_of_empty_input() {
        assert_eq!(
            bytes_to_hex(&keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn reference_address_derivation() {
        assert_eq!(ref_key().address().to_string(), REF_ADDRESS);
    }

    #[test]
    fn small_scalar_addresses() {
        let mut one = [0u8; 32];
        one[31] = 1;
        assert_eq!(
            WalletKey::from_bytes(&one).unwrap().address().to_string(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
        let mut two = [0u8; 32];
        two[31] = 2;
        assert_eq!(
            WalletKey::from_bytes(&two).unwrap().address().to_string(),
            "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf"
        );
    }

    #[test]
    fn reference_message_hash() {
        assert_eq!(bytes_to_hex(&eip191_hash(b"Some data")), REF_HASH);
    }

    #[test]
    fn reference_signature_is_reproduced() {
        let sig = ref_key().sign_message("Some data").unwrap();
        assert_eq!(sig.to_hex(), REF_SIGNATURE);
    }

    #[test]
    fn reference_signature_recovers_reference_address() {
        let sig = WalletSignature::from_hex(REF_SIGNATURE).unwrap();
        let addr = recover_address("Some data", &sig).unwrap();
        assert_eq!(addr.to_string(), REF_ADDRESS);
    }

    #[test]
    fn sign_then_recover_random_key() {
        let key = WalletKey::generate();
        let sig = key.sign_message("hello").unwrap();
        assert_eq!(recover_address("hello", &sig).unwrap(), key.address());
    }

    #[test]
    fn different_message_recovers_different_address() {
        let key = ref_key();
        let sig = key.sign_message("Some data").unwrap();
        let other = recover_address("Some other data", &sig).unwrap();
        assert_ne!(other, key.address());
    }

    #[test]
    fn multibyte_message_length_is_in_bytes() {
        // "é" is two bytes; the prefix must say 2, not 1.
        let mut expected = Vec::new();
        expected.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
        expected.extend_from_slice(b"2");
        expected.extend_from_slice("\u{00e9}".as_bytes());
        assert_eq!(eip191_hash("\u{00e9}".as_bytes()), keccak256(&expected));
    }

    #[test]
    fn v_zero_one_normalized() {
        let sig = ref_key().sign_message("Some data").unwrap();
        let mut raw = *sig.as_bytes();
        raw[64] -= 27;
        let normalized = WalletSignature::from_bytes(raw).unwrap();
        assert_eq!(normalized, sig);
    }

    #[test]
    fn bad_v_rejected() {
        let mut raw = [1u8; 65];
        raw[64] = 5;
        assert!(matches!(
            WalletSignature::from_bytes(raw),
            Err(CryptoError::MalformedSignature(_))
        ));
    }

    #[test]
    fn high_s_signature_recovers_same_address() {
        const N: [u8; 32] = [
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c,
            0xd0, 0x36, 0x41, 0x41,
        ];
        let key = ref_key();
        let sig = key.sign_message("Some data").unwrap();
        let raw = sig.as_bytes();

        // s' = n - s, with the parity bit flipped.
        let mut high = *raw;
        let mut borrow = 0i16;
        for i in (0..32).rev() {
            let d = N[i] as i16 - raw[32 + i] as i16 - borrow;
            let (byte, b) = if d < 0 { (d + 256, 1) } else { (d, 0) };
            high[32 + i] = byte as u8;
            borrow = b;
        }
        high[64] = if raw[64] == 27 { 28 } else { 27 };

        let high_sig = WalletSignature::from_bytes(high).unwrap();
        assert_ne!(high_sig, sig);
        assert_eq!(recover_address("Some data", &high_sig).unwrap(), key.address());
    }

    #[test]
    fn signature_hex_and_serde() {
        let sig = ref_key().sign_message("x").unwrap();
        assert_eq!(sig.to_hex().len(), 132);
        assert_eq!(WalletSignature::from_hex(&sig.to_hex()).unwrap(), sig);
        assert_eq!(WalletSignature::from_hex(&sig.to_hex()[2..]).unwrap(), sig);
        let json = serde_json::to_string(&sig).unwrap();
        let back: WalletSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sig);
    }

    #[test]
    fn signature_invalid_hex() {
        assert!(WalletSignature::from_hex("0xaabb").is_err());
        assert!(WalletSignature::from_hex(&"zz".repeat(65)).is_err());
        assert!(matches!(
            WalletSignature::from_hex(&"+a".repeat(65)),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn key_invalid_inputs() {
        assert!(WalletKey::from_hex("0x1234").is_err());
        assert!(matches!(
            WalletKey::from_hex(&format!("0x{}", "+1".repeat(32))),
            Err(CryptoError::HexDecode(_))
        ));
        assert!(WalletKey::from_bytes(&[0u8; 32]).is_err());
    }

    #[test]
    fn secret_hex_reloads_same_key() {
        let key = WalletKey::generate();
        let hex = key.to_secret_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(WalletKey::from_hex(&hex).unwrap().address(), key.address());
        assert_eq!(ref_key().to_secret_hex().as_str(), &REF_KEY[2..]);
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let debug = format!("{:?}", ref_key());
        assert!(debug.starts_with("WalletKey(<private>"));
        assert!(!debug.contains(&REF_KEY[2..]));
    }
}
