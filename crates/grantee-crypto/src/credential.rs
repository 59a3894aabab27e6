//! # Credentials — Per-Request Proof of Account Control
//!
//! A [`Credential`] is `{account, message, signature}`. It proves that
//! whoever produced `signature` held the private key for `account` when
//! signing `message`. Nothing more: there is no freshness guarantee unless
//! `message` itself embeds a nonce or timestamp.
//!
//! Credentials are built per request and dropped afterwards. The type
//! deliberately has no `Serialize` impl; the wire form is assembled by the
//! caller from the individual fields.

use grantee_core::AccountAddress;

use crate::eip191::{recover_address, WalletKey, WalletSignature};
use crate::error::CryptoError;

/// A signed statement binding an account to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    account: AccountAddress,
    message: String,
    signature: WalletSignature,
}

impl Credential {
    /// Assemble a credential from parts produced elsewhere (e.g. a browser
    /// wallet). Not verified until [`Credential::verify`] is called.
    pub fn new(
        account: AccountAddress,
        message: impl Into<String>,
        signature: WalletSignature,
    ) -> Self {
        Self {
            account,
            message: message.into(),
            signature,
        }
    }

    /// Sign `message` with `key`, claiming the key's own address.
    pub fn sign(key: &WalletKey, message: impl Into<String>) -> Result<Self, CryptoError> {
        let message = message.into();
        let signature = key.sign_message(&message)?;
        Ok(Self {
            account: key.address(),
            message,
            signature,
        })
    }

    /// The claimed account.
    pub fn account(&self) -> AccountAddress {
        self.account
    }

    /// The signed message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The 65-byte signature.
    pub fn signature(&self) -> &WalletSignature {
        &self.signature
    }

    /// Recover the address that actually signed the message.
    pub fn recover(&self) -> Result<AccountAddress, CryptoError> {
        recover_address(&self.message, &self.signature)
    }

    /// Verify that the signature was produced by the claimed account.
    ///
    /// Returns the verified address on success.
    pub fn verify(&self) -> Result<AccountAddress, CryptoError> {
        let recovered = self.recover()?;
        if recovered != self.account {
            return Err(CryptoError::AddressMismatch {
                claimed: self.account,
                recovered,
            });
        }
        Ok(recovered)
    }

    /// Verify as [`Credential::verify`], and additionally require that the
    /// signed message is exactly `expected`.
    pub fn verify_for(&self, expected: &str) -> Result<AccountAddress, CryptoError> {
        if self.message != expected {
            return Err(CryptoError::MessageMismatch);
        }
        self.verify()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn any_message_roundtrips(msg in ".{0,200}") {
            let key = WalletKey::from_bytes(&[0x33; 32]).unwrap();
            let cred = Credential::sign(&key, msg.clone()).unwrap();
            prop_assert_eq!(cred.verify_for(&msg).unwrap(), key.address());
        }
    }
}
