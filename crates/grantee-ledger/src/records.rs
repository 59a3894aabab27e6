//! Ledger-side records.

use grantee_core::{AccountAddress, ContentDigest, ScholarshipId};
use serde::{Deserialize, Serialize};

/// A scholarship as the ledger knows it: who created it, what it holds, and
/// the digest its off-chain description must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipRecord {
    /// Ledger-issued id.
    pub id: ScholarshipId,
    /// Creating account.
    pub creator: AccountAddress,
    /// Balance in the ledger's smallest unit (wei).
    pub balance: u128,
    /// Commitment to the off-chain scholarship content.
    pub content_digest: ContentDigest,
    /// `false` once the creator has deleted the scholarship.
    pub active: bool,
}

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a fund manager; eligible for payment.
    Approved,
    /// Rejected by a fund manager.
    Rejected,
    /// Withdrawn by the applicant.
    Cancelled,
}

impl ApplicationStatus {
    /// Contract enum ordinal.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Cancelled => 3,
        }
    }

    /// Decode a contract enum ordinal.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Pending),
            1 => Some(Self::Approved),
            2 => Some(Self::Rejected),
            3 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Label shown to users.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applicant's application to one scholarship.
///
/// `data_hash` is written once by `record_application`. `status` and `paid`
/// change only through the review operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    /// Scholarship applied to.
    pub scholarship_id: ScholarshipId,
    /// Applicant account.
    pub applicant: AccountAddress,
    /// Commitment to the application content.
    pub data_hash: ContentDigest,
    /// Whether a payment has been made.
    pub paid: bool,
    /// Review state.
    pub status: ApplicationStatus,
}

impl ApplicationRecord {
    /// `"Sent"` once paid, `"Not Paid"` otherwise.
    pub fn payment_label(&self) -> &'static str {
        if self.paid {
            "Sent"
        } else {
            "Not Paid"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ordinals_roundtrip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
            ApplicationStatus::Cancelled,
        ] {
            assert_eq!(ApplicationStatus::from_u8(status.as_u8()), Some(status));
        }
        assert_eq!(ApplicationStatus::from_u8(4), None);
    }

    #[test]
    fn status_display() {
        assert_eq!(ApplicationStatus::Approved.to_string(), "Approved");
        assert_eq!(ApplicationStatus::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn payment_label() {
        let mut record = ApplicationRecord {
            scholarship_id: ScholarshipId(1),
            applicant: AccountAddress::from_bytes([1u8; 20]),
            data_hash: ContentDigest::from_bytes([0u8; 32]),
            paid: false,
            status: ApplicationStatus::Pending,
        };
        assert_eq!(record.payment_label(), "Not Paid");
        record.paid = true;
        assert_eq!(record.payment_label(), "Sent");
    }

    #[test]
    fn application_record_wire_names() {
        let record = ApplicationRecord {
            scholarship_id: ScholarshipId(2),
            applicant: AccountAddress::from_bytes([1u8; 20]),
            data_hash: ContentDigest::from_bytes([0xab; 32]),
            paid: false,
            status: ApplicationStatus::Pending,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["scholarshipId"], 2);
        assert_eq!(json["dataHash"], "ab".repeat(32));
        assert_eq!(json["status"], "Pending");
    }
}
