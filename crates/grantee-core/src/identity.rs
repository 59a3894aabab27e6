//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers the ledger and the off-chain store
//! share. You cannot pass a `ScholarshipId` where an account is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GranteeError;

/// Ledger-issued scholarship identifier.
///
/// Issued from the contract's counter when a scholarship is created; the
/// off-chain store keys scholarship content by the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipId(pub u64);

impl ScholarshipId {
    /// Access the inner sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ScholarshipId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A 20-byte ledger account address.
///
/// Parsed case-insensitively from `0x`-prefixed hex and always rendered in
/// lowercase, which is the form the off-chain store keys profiles by.
/// Mixed-case checksums are accepted but not validated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; 20]);

impl AccountAddress {
    /// Wrap raw address bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The raw 20 address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse an address from `0x`-prefixed (or bare) 40-character hex.
    pub fn parse(s: &str) -> Result<Self, GranteeError> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if hex.len() != 40 {
            return Err(GranteeError::InvalidIdentifier(format!(
                "account address must be 40 hex chars, got {}",
                hex.len()
            )));
        }
        let bytes = crate::hex::decode_fixed::<20>(hex)
            .map_err(|e| GranteeError::InvalidIdentifier(format!("{s:?}: {e}")))?;
        Ok(Self(bytes))
    }

    /// Lowercase `0x`-prefixed rendering.
    pub fn to_hex(&self) -> String {
        format!("0x{}", crate::hex::encode(&self.0))
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex())
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = GranteeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23";

    #[test]
    fn parse_mixed_case_renders_lowercase() {
        let addr = AccountAddress::parse(MIXED).unwrap();
        assert_eq!(addr.to_string(), MIXED.to_lowercase());
    }

    #[test]
    fn parse_without_prefix() {
        let a = AccountAddress::parse(&MIXED[2..]).unwrap();
        let b = AccountAddress::parse(MIXED).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parse_rejects_short_and_non_hex() {
        assert!(AccountAddress::parse("0x1234").is_err());
        assert!(AccountAddress::parse(&format!("0x{}", "g".repeat(40))).is_err());
    }

    #[test]
    fn parse_rejects_signed_pairs() {
        let signed = format!("0x{}", "+a".repeat(20));
        let err = AccountAddress::parse(&signed).unwrap_err();
        assert!(err.to_string().contains("invalid hex digit '+'"), "{err}");
        assert!(AccountAddress::parse(&"-a".repeat(20)).is_err());
    }

    #[test]
    fn serde_uses_lowercase_string() {
        let addr = AccountAddress::parse(MIXED).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", MIXED.to_lowercase()));
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn scholarship_id_is_transparent_number() {
        let id = ScholarshipId(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        assert_eq!(id.to_string(), "7");
    }
}
