//! # Scholarship Administration
//!
//! Ledger-only operations performed as the connected account: funding,
//! fund-manager management, deletion, and application review. None of them
//! touch the off-chain store. Authorization is the ledger's; this type only
//! supplies the caller.

use std::sync::Arc;

use grantee_core::{AccountAddress, ScholarshipId};
use grantee_ledger::{ApplicationRecord, ApplicationStatus, Ledger};

use crate::authenticator::SignatureAuthenticator;
use crate::error::BridgeError;

/// Scholarship lifecycle and review, on behalf of the connected account.
pub struct ScholarshipAdmin<L: Ledger> {
    ledger: Arc<L>,
    auth: SignatureAuthenticator,
}

impl<L: Ledger> ScholarshipAdmin<L> {
    pub fn new(ledger: Arc<L>, auth: SignatureAuthenticator) -> Self {
        Self { ledger, auth }
    }

    /// Add funds. Returns the new balance.
    pub async fn deposit(&self, id: ScholarshipId, amount: u128) -> Result<u128, BridgeError> {
        let caller = self.auth.current_account().await?;
        let balance = self.ledger.deposit(caller, id, amount).await?;
        tracing::info!(%id, amount = %amount, balance = %balance, "deposit recorded");
        Ok(balance)
    }

    pub async fn add_fund_manager(
        &self,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), BridgeError> {
        let caller = self.auth.current_account().await?;
        self.ledger.add_fund_manager(caller, id, manager).await?;
        Ok(())
    }

    pub async fn remove_fund_manager(
        &self,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), BridgeError> {
        let caller = self.auth.current_account().await?;
        self.ledger.remove_fund_manager(caller, id, manager).await?;
        Ok(())
    }

    /// Current fund managers. Needs no connected account.
    pub async fn fund_managers(
        &self,
        id: ScholarshipId,
    ) -> Result<Vec<AccountAddress>, BridgeError> {
        Ok(self.ledger.fund_managers(id).await?)
    }

    /// Delete a scholarship and refund its balance to the creator. Returns
    /// the refunded amount.
    pub async fn delete(&self, id: ScholarshipId) -> Result<u128, BridgeError> {
        let caller = self.auth.current_account().await?;
        let refund = self.ledger.delete_scholarship(caller, id).await?;
        tracing::info!(%id, refund = %refund, "scholarship deleted");
        Ok(refund)
    }

    /// Applications awaiting or past review for a scholarship.
    pub async fn applications(
        &self,
        id: ScholarshipId,
    ) -> Result<Vec<ApplicationRecord>, BridgeError> {
        Ok(self.ledger.applications_to(id).await?)
    }

    /// Set an application's review status.
    pub async fn review(
        &self,
        id: ScholarshipId,
        applicant: AccountAddress,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, BridgeError> {
        let caller = self.auth.current_account().await?;
        let record = self
            .ledger
            .set_application_status(caller, id, applicant, status)
            .await?;
        tracing::info!(%id, %applicant, %status, "application reviewed");
        Ok(record)
    }

    /// Pay an approved applicant. Returns the remaining balance.
    pub async fn pay(
        &self,
        id: ScholarshipId,
        applicant: AccountAddress,
        amount: u128,
    ) -> Result<u128, BridgeError> {
        let caller = self.auth.current_account().await?;
        let remaining = self
            .ledger
            .pay_application(caller, id, applicant, amount)
            .await?;
        tracing::info!(%id, %applicant, amount = %amount, "application paid");
        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::LocalWallet;
    use grantee_core::ContentDigest;
    use grantee_crypto::WalletKey;
    use grantee_ledger::{InMemoryLedger, LedgerError};

    fn key(b: u8) -> WalletKey {
        WalletKey::from_bytes(&[b; 32]).unwrap()
    }

    async fn setup() -> (
        Arc<InMemoryLedger>,
        Arc<LocalWallet>,
        ScholarshipAdmin<InMemoryLedger>,
        ScholarshipId,
    ) {
        let ledger = Arc::new(InMemoryLedger::new());
        let creator = key(0x11);
        let id = ledger
            .create_scholarship(creator.address(), ContentDigest::from_bytes([0u8; 32]))
            .await
            .unwrap();
        let wallet = Arc::new(LocalWallet::new(creator));
        let admin = ScholarshipAdmin::new(
            ledger.clone(),
            SignatureAuthenticator::new(wallet.clone()),
        );
        (ledger, wallet, admin, id)
    }

    #[tokio::test]
    async fn creator_funds_reviews_and_pays() {
        let (ledger, _wallet, admin, id) = setup().await;
        let applicant = key(0x33).address();
        ledger
            .record_application(applicant, id, ContentDigest::from_bytes([1u8; 32]))
            .await
            .unwrap();

        assert_eq!(admin.deposit(id, 1_000).await.unwrap(), 1_000);
        admin.review(id, applicant, ApplicationStatus::Approved).await.unwrap();
        assert_eq!(admin.pay(id, applicant, 250).await.unwrap(), 750);
        assert!(admin.applications(id).await.unwrap()[0].paid);
    }

    #[tokio::test]
    async fn manager_rights_follow_wallet_account() {
        let (_ledger, wallet, admin, id) = setup().await;
        let manager = key(0x22);
        admin.add_fund_manager(id, manager.address()).await.unwrap();
        assert_eq!(admin.fund_managers(id).await.unwrap(), vec![manager.address()]);

        // A fund manager cannot manage other managers.
        wallet.switch_to(Some(manager));
        assert!(matches!(
            admin.remove_fund_manager(id, key(0x22).address()).await,
            Err(BridgeError::LedgerCallFailed(LedgerError::Unauthorized { .. }))
        ));
    }

    #[tokio::test]
    async fn delete_refunds_and_disconnected_is_refused() {
        let (ledger, wallet, admin, id) = setup().await;
        admin.deposit(id, 40).await.unwrap();
        assert_eq!(admin.delete(id).await.unwrap(), 40);
        assert_eq!(ledger.credited(key(0x11).address()), 40);

        wallet.switch_to(None);
        assert!(matches!(
            admin.deposit(id, 1).await,
            Err(BridgeError::Unauthenticated)
        ));
    }
}
