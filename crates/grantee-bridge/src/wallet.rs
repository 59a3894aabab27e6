//! # Wallet Agent
//!
//! The connected account is an injected dependency. A browser extension, a
//! hardware wallet, or a local key can stand behind [`WalletAgent`]; the
//! bridge only asks which account is active and for signatures.
//!
//! `sign_message` may wait indefinitely for user approval. The bridge adds
//! no timeout; callers that need one wrap the operation themselves, and
//! dropping the future cancels it.

use std::sync::Mutex;

use async_trait::async_trait;
use grantee_core::AccountAddress;
use grantee_crypto::{WalletKey, WalletSignature};

use crate::error::WalletError;

/// Source of the current account and of personal-message signatures.
#[async_trait]
pub trait WalletAgent: Send + Sync {
    /// The connected account, or `None` when disconnected. May change
    /// between calls.
    async fn current_account(&self) -> Option<AccountAddress>;

    /// EIP-191 sign `message` with `account`'s key.
    async fn sign_message(
        &self,
        account: AccountAddress,
        message: &str,
    ) -> Result<WalletSignature, WalletError>;
}

/// A wallet backed by an in-process key. Signs without prompting.
pub struct LocalWallet {
    key: Mutex<Option<WalletKey>>,
}

impl LocalWallet {
    /// A wallet connected with `key`.
    pub fn new(key: WalletKey) -> Self {
        Self {
            key: Mutex::new(Some(key)),
        }
    }

    /// A wallet with no connected account.
    pub fn disconnected() -> Self {
        Self {
            key: Mutex::new(None),
        }
    }

    /// Switch to another key, or disconnect with `None`.
    pub fn switch_to(&self, key: Option<WalletKey>) {
        if let Ok(mut guard) = self.key.lock() {
            *guard = key;
        }
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let account = self
            .key
            .lock()
            .ok()
            .and_then(|k| k.as_ref().map(WalletKey::address));
        f.debug_struct("LocalWallet")
            .field("account", &account)
            .finish()
    }
}

#[async_trait]
impl WalletAgent for LocalWallet {
    async fn current_account(&self) -> Option<AccountAddress> {
        self.key
            .lock()
            .ok()
            .and_then(|k| k.as_ref().map(WalletKey::address))
    }

    async fn sign_message(
        &self,
        account: AccountAddress,
        message: &str,
    ) -> Result<WalletSignature, WalletError> {
        let guard = self
            .key
            .lock()
            .map_err(|_| WalletError::Unavailable("wallet lock poisoned".into()))?;
        match guard.as_ref() {
            Some(key) if key.address() == account => Ok(key.sign_message(message)?),
            _ => Err(WalletError::UnknownAccount(account)),
        }
    }
}
