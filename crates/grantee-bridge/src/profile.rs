//! # Profile Sync
//!
//! Reads and writes the connected account's off-chain profile. The store
//! holds no secret for the user; each call is authorized by a fresh wallet
//! signature.
//!
//! | Operation | Signed message | Sent as |
//! |-----------|----------------|---------|
//! | pull | lower-case `0x` address | `?signature=` on `GET /user/{address}` |
//! | push | canonical JSON of the profile | `{wallet_address, signature, data}` |
//!
//! ## Replay
//!
//! The pull challenge is static, so its signature never changes for a given
//! account. Anyone who observes one pull request can repeat it and read the
//! profile. [`ProfileSync::pull_challenge`] exposes the message so the
//! exposure is visible to callers.
//!
//! ## Ordering
//!
//! No store call is made until the wallet has returned a signature. With no
//! connected account both operations fail with
//! [`BridgeError::Unauthenticated`] before touching the network, and
//! dropping a pending operation while the wallet waits for approval leaves
//! the store untouched.

use grantee_core::{AccountAddress, CanonicalBytes};
use grantee_store_client::{PostUserRequest, StoreClient, UserProfile};

use crate::authenticator::SignatureAuthenticator;
use crate::error::BridgeError;

/// Signed profile reads and writes for the connected account.
#[derive(Debug, Clone)]
pub struct ProfileSync {
    auth: SignatureAuthenticator,
    store: StoreClient,
}

impl ProfileSync {
    pub fn new(auth: SignatureAuthenticator, store: StoreClient) -> Self {
        Self { auth, store }
    }

    /// The message signed to read `account`'s profile.
    pub fn pull_challenge(account: AccountAddress) -> String {
        // Display is already lower-case hex.
        account.to_string()
    }

    /// The message signed to write `profile`: its canonical JSON.
    pub fn push_message(profile: &UserProfile) -> Result<String, BridgeError> {
        Ok(CanonicalBytes::new(profile)?.as_str().to_string())
    }

    /// Read the connected account's profile. `Ok(None)` if the store has
    /// none.
    pub async fn pull(&self) -> Result<Option<UserProfile>, BridgeError> {
        let account = self.auth.current_account().await?;
        let credential = self
            .auth
            .sign_as(account, Self::pull_challenge(account))
            .await?;
        let profile = self
            .store
            .users()
            .get(credential.account(), &credential.signature().to_hex())
            .await?;
        tracing::debug!(%account, found = profile.is_some(), "profile pulled");
        Ok(profile)
    }

    /// Write the connected account's profile.
    pub async fn push(&self, profile: &UserProfile) -> Result<(), BridgeError> {
        let credential = self.auth.sign(Self::push_message(profile)?).await?;
        let req = PostUserRequest {
            wallet_address: credential.account(),
            signature: credential.signature().to_hex(),
            data: credential.message().to_string(),
        };
        self.store.users().post(&req).await?;
        tracing::debug!(account = %credential.account(), "profile pushed");
        Ok(())
    }
}
