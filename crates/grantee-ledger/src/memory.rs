//! # In-Memory Ledger
//!
//! A single-process [`Ledger`] with the contract's authorization rules.
//! Every call completes atomically under one lock, which matches the
//! serial execution of transactions on a chain.
//!
//! ## Warning
//!
//! Provides no durability. Balances are bookkeeping only; refunds and
//! payouts are tallied per recipient in [`InMemoryLedger::credited`].

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use grantee_core::{AccountAddress, ContentDigest, ScholarshipId};

use crate::contract::Ledger;
use crate::error::LedgerError;
use crate::records::{ApplicationRecord, ApplicationStatus, ScholarshipRecord};

#[derive(Debug)]
struct ScholarshipEntry {
    record: ScholarshipRecord,
    managers: Vec<AccountAddress>,
}

impl ScholarshipEntry {
    fn may_review(&self, caller: AccountAddress) -> bool {
        caller == self.record.creator || self.managers.contains(&caller)
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    counter: u64,
    scholarships: BTreeMap<ScholarshipId, ScholarshipEntry>,
    applications: BTreeMap<(ScholarshipId, AccountAddress), ApplicationRecord>,
    credited: HashMap<AccountAddress, u128>,
}

impl LedgerState {
    fn entry(&self, id: ScholarshipId) -> Result<&ScholarshipEntry, LedgerError> {
        self.scholarships
            .get(&id)
            .ok_or(LedgerError::ScholarshipNotFound(id))
    }

    fn entry_mut(&mut self, id: ScholarshipId) -> Result<&mut ScholarshipEntry, LedgerError> {
        self.scholarships
            .get_mut(&id)
            .ok_or(LedgerError::ScholarshipNotFound(id))
    }

    fn active_entry_mut(
        &mut self,
        id: ScholarshipId,
    ) -> Result<&mut ScholarshipEntry, LedgerError> {
        let entry = self.entry_mut(id)?;
        if !entry.record.active {
            return Err(LedgerError::Rejected(format!(
                "scholarship {id} has been deleted"
            )));
        }
        Ok(entry)
    }
}

/// In-memory implementation of [`Ledger`].
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
    offline: AtomicBool,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the connection: while offline, every call fails with
    /// [`LedgerError::Unavailable`] and no state changes.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Total refunds and payouts credited to `account`.
    pub fn credited(&self, account: AccountAddress) -> u128 {
        self.state
            .read()
            .map(|s| s.credited.get(&account).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.check_online()?;
        self.state
            .read()
            .map_err(|_| LedgerError::Unavailable("ledger state lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.check_online()?;
        self.state
            .write()
            .map_err(|_| LedgerError::Unavailable("ledger state lock poisoned".into()))
    }

    fn check_online(&self) -> Result<(), LedgerError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("no response from ledger".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn counter(&self) -> Result<ScholarshipId, LedgerError> {
        Ok(ScholarshipId(self.read()?.counter))
    }

    async fn create_scholarship(
        &self,
        creator: AccountAddress,
        content_digest: ContentDigest,
    ) -> Result<ScholarshipId, LedgerError> {
        let mut state = self.write()?;
        state.counter += 1;
        let id = ScholarshipId(state.counter);
        state.scholarships.insert(
            id,
            ScholarshipEntry {
                record: ScholarshipRecord {
                    id,
                    creator,
                    balance: 0,
                    content_digest,
                    active: true,
                },
                managers: Vec::new(),
            },
        );
        tracing::debug!(%id, %creator, digest = %content_digest, "scholarship created");
        Ok(id)
    }

    async fn scholarship(
        &self,
        id: ScholarshipId,
    ) -> Result<Option<ScholarshipRecord>, LedgerError> {
        Ok(self
            .read()?
            .scholarships
            .get(&id)
            .map(|e| e.record.clone()))
    }

    async fn active_scholarships(&self) -> Result<Vec<ScholarshipRecord>, LedgerError> {
        Ok(self
            .read()?
            .scholarships
            .values()
            .filter(|e| e.record.active)
            .map(|e| e.record.clone())
            .collect())
    }

    async fn scholarships_by_creator(
        &self,
        creator: AccountAddress,
    ) -> Result<Vec<ScholarshipRecord>, LedgerError> {
        Ok(self
            .read()?
            .scholarships
            .values()
            .filter(|e| e.record.active && e.record.creator == creator)
            .map(|e| e.record.clone())
            .collect())
    }

    async fn deposit(
        &self,
        _caller: AccountAddress,
        id: ScholarshipId,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::Rejected("deposit must be positive".into()));
        }
        let mut state = self.write()?;
        let entry = state.active_entry_mut(id)?;
        entry.record.balance = entry
            .record
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Rejected("balance overflow".into()))?;
        Ok(entry.record.balance)
    }

    async fn add_fund_manager(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        let entry = state.active_entry_mut(id)?;
        if caller != entry.record.creator {
            return Err(LedgerError::Unauthorized {
                caller,
                scholarship: id,
                action: "add fund manager",
            });
        }
        if !entry.managers.contains(&manager) {
            entry.managers.push(manager);
        }
        Ok(())
    }

    async fn remove_fund_manager(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
        manager: AccountAddress,
    ) -> Result<(), LedgerError> {
        let mut state = self.write()?;
        let entry = state.active_entry_mut(id)?;
        if caller != entry.record.creator {
            return Err(LedgerError::Unauthorized {
                caller,
                scholarship: id,
                action: "remove fund manager",
            });
        }
        let before = entry.managers.len();
        entry.managers.retain(|m| *m != manager);
        if entry.managers.len() == before {
            return Err(LedgerError::Rejected(format!(
                "{manager} is not a fund manager of scholarship {id}"
            )));
        }
        Ok(())
    }

    async fn fund_managers(&self, id: ScholarshipId) -> Result<Vec<AccountAddress>, LedgerError> {
        Ok(self.read()?.entry(id)?.managers.clone())
    }

    async fn delete_scholarship(
        &self,
        caller: AccountAddress,
        id: ScholarshipId,
    ) -> Result<u128, LedgerError> {
        let mut state = self.write()?;
        let entry = state.active_entry_mut(id)?;
        if caller != entry.record.creator {
            return Err(LedgerError::Unauthorized {
                caller,
                scholarship: id,
                action: "delete",
            });
        }
        let refund = entry.record.balance;
        entry.record.balance = 0;
        entry.record.active = false;
        *state.credited.entry(caller).or_insert(0) += refund;
        tracing::debug!(%id, refund = %refund, "scholarship deleted");
        Ok(refund)
    }

    async fn record_application(
        &self,
        applicant: AccountAddress,
        scholarship: ScholarshipId,
        data_hash: ContentDigest,
    ) -> Result<ApplicationRecord, LedgerError> {
        let mut state = self.write()?;
        state.active_entry_mut(scholarship)?;
        let key = (scholarship, applicant);
        if state.applications.contains_key(&key) {
            return Err(LedgerError::DuplicateApplication {
                scholarship,
                applicant,
            });
        }
        let record = ApplicationRecord {
            scholarship_id: scholarship,
            applicant,
            data_hash,
            paid: false,
            status: ApplicationStatus::Pending,
        };
        state.applications.insert(key, record.clone());
        Ok(record)
    }

    async fn applications_for(
        &self,
        account: AccountAddress,
    ) -> Result<Vec<ApplicationRecord>, LedgerError> {
        Ok(self
            .read()?
            .applications
            .values()
            .filter(|a| a.applicant == account)
            .cloned()
            .collect())
    }

    async fn applications_to(
        &self,
        scholarship: ScholarshipId,
    ) -> Result<Vec<ApplicationRecord>, LedgerError> {
        let state = self.read()?;
        state.entry(scholarship)?;
        Ok(state
            .applications
            .range((scholarship, AccountAddress::from_bytes([0u8; 20]))..)
            .take_while(|((id, _), _)| *id == scholarship)
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn set_application_status(
        &self,
        caller: AccountAddress,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, LedgerError> {
        let mut state = self.write()?;
        let may_review = state.entry(scholarship)?.may_review(caller);
        let record = state
            .applications
            .get_mut(&(scholarship, applicant))
            .ok_or(LedgerError::ApplicationNotFound {
                scholarship,
                applicant,
            })?;

        let self_cancel = caller == applicant
            && status == ApplicationStatus::Cancelled
            && record.status == ApplicationStatus::Pending;
        if !may_review && !self_cancel {
            return Err(LedgerError::Unauthorized {
                caller,
                scholarship,
                action: "set application status",
            });
        }
        if record.paid {
            return Err(LedgerError::Rejected(
                "status of a paid application is final".into(),
            ));
        }
        record.status = status;
        Ok(record.clone())
    }

    async fn pay_application(
        &self,
        caller: AccountAddress,
        scholarship: ScholarshipId,
        applicant: AccountAddress,
        amount: u128,
    ) -> Result<u128, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::Rejected("payment must be positive".into()));
        }
        let mut state = self.write()?;
        let entry = state.entry(scholarship)?;
        if !entry.may_review(caller) {
            return Err(LedgerError::Unauthorized {
                caller,
                scholarship,
                action: "pay application",
            });
        }
        let balance = entry.record.balance;

        let record = state
            .applications
            .get(&(scholarship, applicant))
            .ok_or(LedgerError::ApplicationNotFound {
                scholarship,
                applicant,
            })?;
        if record.paid {
            return Err(LedgerError::Rejected("application already paid".into()));
        }
        if record.status != ApplicationStatus::Approved {
            return Err(LedgerError::Rejected(format!(
                "application is {}, not Approved",
                record.status
            )));
        }
        if amount > balance {
            return Err(LedgerError::InsufficientFunds {
                scholarship,
                balance,
                requested: amount,
            });
        }

        let remaining = balance - amount;
        state.entry_mut(scholarship)?.record.balance = remaining;
        if let Some(record) = state.applications.get_mut(&(scholarship, applicant)) {
            record.paid = true;
        }
        *state.credited.entry(applicant).or_insert(0) += amount;
        tracing::debug!(%scholarship, %applicant, amount = %amount, "application paid");
        Ok(remaining)
    }
}
