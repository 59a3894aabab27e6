//! # grantee-ledger — The Ledger Contract Surface
//!
//! The ledger holds the authoritative, money-bearing state: scholarship
//! balances, fund managers, and one [`ApplicationRecord`] per applicant per
//! scholarship. It never holds descriptive content, only digests committing
//! to it.
//!
//! The [`Ledger`] trait is the contract surface consumed by the bridge.
//! [`InMemoryLedger`] implements it with the same authorization rules the
//! deployed contract enforces, for development and tests.

pub mod contract;
pub mod error;
pub mod memory;
pub mod records;

pub use contract::Ledger;
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use records::{ApplicationRecord, ApplicationStatus, ScholarshipRecord};
