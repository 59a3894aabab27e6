use grantee_core::{AccountAddress, ScholarshipId};
use thiserror::Error;

/// Errors returned by ledger calls.
///
/// `Unavailable` is a transport failure (no response counts as failure).
/// Every other variant is the contract refusing the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No scholarship with this id has been issued.
    #[error("scholarship {0} not found")]
    ScholarshipNotFound(ScholarshipId),

    /// The applicant has no application to this scholarship.
    #[error("no application by {applicant} to scholarship {scholarship}")]
    ApplicationNotFound {
        /// Scholarship.
        scholarship: ScholarshipId,
        /// Applicant.
        applicant: AccountAddress,
    },

    /// The caller lacks the role required for the operation.
    #[error("{caller} may not {action} on scholarship {scholarship}")]
    Unauthorized {
        /// Account that attempted the call.
        caller: AccountAddress,
        /// Scholarship the call targeted.
        scholarship: ScholarshipId,
        /// Operation attempted.
        action: &'static str,
    },

    /// The applicant already applied; `dataHash` is set once.
    #[error("{applicant} already applied to scholarship {scholarship}")]
    DuplicateApplication {
        /// Scholarship.
        scholarship: ScholarshipId,
        /// Applicant.
        applicant: AccountAddress,
    },

    /// The scholarship balance cannot cover the requested amount.
    #[error("scholarship {scholarship} holds {balance}, cannot pay {requested}")]
    InsufficientFunds {
        /// Scholarship.
        scholarship: ScholarshipId,
        /// Current balance.
        balance: u128,
        /// Amount requested.
        requested: u128,
    },

    /// The ledger could not be reached or did not answer.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The contract rejected the call for a reason not covered above.
    #[error("ledger rejected call: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_display_names_action() {
        let err = LedgerError::Unauthorized {
            caller: AccountAddress::from_bytes([7u8; 20]),
            scholarship: ScholarshipId(3),
            action: "add fund manager",
        };
        let msg = err.to_string();
        assert!(msg.contains("add fund manager"));
        assert!(msg.contains("scholarship 3"));
    }

    #[test]
    fn insufficient_funds_display() {
        let msg = LedgerError::InsufficientFunds {
            scholarship: ScholarshipId(1),
            balance: 10,
            requested: 25,
        }
        .to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("25"));
    }
}
