//! # Signature Authenticator
//!
//! Proves control of an account to the off-chain store without a password
//! or session. Every credential is built per request from the account the
//! wallet reports at that moment.
//!
//! ## Known Weakness
//!
//! A credential is only as fresh as its message. Signing a static,
//! predictable message (the profile-read challenge is the lower-case
//! address) yields the same credential every time, so a captured credential
//! can be replayed for as long as the store accepts that message.

use std::sync::Arc;

use grantee_core::AccountAddress;
use grantee_crypto::Credential;

use crate::error::BridgeError;
use crate::wallet::WalletAgent;

/// Builds and verifies wallet credentials.
#[derive(Clone)]
pub struct SignatureAuthenticator {
    wallet: Arc<dyn WalletAgent>,
}

impl SignatureAuthenticator {
    pub fn new(wallet: Arc<dyn WalletAgent>) -> Self {
        Self { wallet }
    }

    /// The connected account, or `Unauthenticated`.
    pub async fn current_account(&self) -> Result<AccountAddress, BridgeError> {
        self.wallet
            .current_account()
            .await
            .ok_or(BridgeError::Unauthenticated)
    }

    /// Sign `message` with the connected account.
    ///
    /// The wallet's signature is checked against the account before the
    /// credential is returned, so a misbehaving wallet cannot hand the store
    /// a credential for someone else.
    pub async fn sign(&self, message: impl Into<String>) -> Result<Credential, BridgeError> {
        let account = self.current_account().await?;
        self.sign_as(account, message).await
    }

    /// Sign `message` with a specific account. The wallet refuses if it no
    /// longer controls `account`.
    pub async fn sign_as(
        &self,
        account: AccountAddress,
        message: impl Into<String>,
    ) -> Result<Credential, BridgeError> {
        let message = message.into();
        let signature = self.wallet.sign_message(account, &message).await?;
        let credential = Credential::new(account, message, signature);
        credential.verify()?;
        Ok(credential)
    }

    /// Recover and check the signer of a credential.
    pub fn verify(credential: &Credential) -> Result<AccountAddress, BridgeError> {
        Ok(credential.verify()?)
    }
}

impl std::fmt::Debug for SignatureAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureAuthenticator").finish_non_exhaustive()
    }
}
