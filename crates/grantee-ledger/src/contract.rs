//! # The Ledger Trait
//!
//! Calls the bridge makes against the scholarship contract. Every
//! state-changing call names its `caller`: on a real chain that is the
//! account that signed the transaction, and the contract authorizes on it.
//!
//! ## Security Invariant
//!
//! Implementations must return `Ok` from a write only once the write is
//! durably recorded. The bridge issues the off-chain write after the ledger
//! write returns and treats `Ok` as final.

use async_trait::async_trait;
use grantee_core::{AccountAddress, ContentDigest, ScholarshipId};

use crate::error::LedgerError;
use crate::records::{ApplicationRecord, ApplicationStatus, ScholarshipRecord};

/// The scholarship contract surface.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Id of the most recently created scholarship (`0` before the first).
    async fn counter(&self) -> Result<ScholarshipId, LedgerError>;

    /// Create a scholarship committing to `content_digest`, returning the
    /// issued id.
    async fn create_scholarship(
        &self,
        creator: AccountAddress,
        content_digest: ContentDigest,
    ) -> Result<ScholarshipId, LedgerError>;

    /// Look up a scholarship. Deleted scholarships are still returned, with
    /// `active == false`.
    async fn scholarship(&self, id: ScholarshipId)
        -> Result<Option<ScholarshipRecord>, LedgerError>;

    /// All scholarships that have not been deleted, in id order.
    async fn active_scholarships(&self) -> Result<Vec<ScholarshipRecord>, LedgerError>;

    /// Active scholarships created by `creator`, in id order.
    async fn scholarships_by_creator(
        &self,
        creator: AccountAddress,
    ) -> Result<Vec<ScholarshipRecord>, LedgerError>;

    /// Add `amount` to a scholarship balance. Returns the new balance.
    async fn deposit(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
        amount: u128,
    ) -> Result<u128, LedgerError>;

    /// Grant `manager` review rights on a scholarship. Creator only.
    async fn add_fund_manager(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), LedgerError>;

    /// Revoke review rights. Creator only.
    async fn remove_fund_manager(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), LedgerError>;

    /// Current fund managers of a scholarship.
    async fn fund_managers(&self, id: ScholarshipId) -> Result<Vec<AccountAddress>, LedgerError>;

    /// Deactivate a scholarship and refund its balance to the creator.
    /// Creator only. Returns the refunded amount.
    async fn delete_scholarship(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
    ) -> Result<u128, LedgerError>;

    /// Record `applicant`'s application with its content commitment.
    async fn record_application(
        &self,
        applicant: AccountAddress,
        scholarship: ScholarshipId,
        data_hash: ContentDigest,
    ) -> Result<ApplicationRecord, LedgerError>;

    /// Applications submitted by `account`.
    async fn applications_for(
        &self,
        account: AccountAddress,
    ) -> Result<Vec<ApplicationRecord>, LedgerError>;

    /// Applications submitted to a scholarship.
    async fn applications_to(
        &self,
        scholarship: ScholarshipId,
    ) -> Result<Vec<ApplicationRecord>, LedgerError>;

    /// Set the review status of an application.
    ///
    /// Fund managers and the creator may set any status. The applicant may
    /// only cancel their own pending application.
    async fn set_application_status(
        &self,
        caller: AccountAddress,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, LedgerError>;

    /// Pay an approved applicant from the scholarship balance. Fund managers
    /// and the creator only; once per application. Returns the remaining
    /// balance.
    async fn pay_application(
        &self,
        caller: AccountAddress,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
        amount: u128,
    ) -> Result<u128, LedgerError>;
}
