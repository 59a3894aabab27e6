//! # Application Hand-Off
//!
//! `POST /apply` forwards an applicant's essay to the review agent after the
//! application has been recorded on the ledger.

use grantee_core::{AccountAddress, ScholarshipId};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::http::{ensure_success, resource_url, send};

/// The committed content of an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationData {
    pub essay: String,
}

impl ApplicationData {
    /// Whitespace-separated word count.
    pub fn word_count(&self) -> usize {
        self.essay.split_whitespace().count()
    }
}

/// Body of `POST /apply`.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyRequest {
    pub wallet_address: AccountAddress,
    #[serde(rename = "scholarshipId")]
    pub scholarship_id: ScholarshipId,
    pub application_data: ApplicationData,
}

/// Client for the review agent hand-off.
#[derive(Debug, Clone)]
pub struct ApplicationClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ApplicationClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Submit an application to the review agent.
    pub async fn apply(&self, req: &ApplyRequest) -> Result<(), StoreError> {
        let endpoint = "POST /apply";
        let url = resource_url(&self.base_url, "apply");
        let resp = send(endpoint, self.http.post(&url).json(req)).await?;
        ensure_success(endpoint, resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_request_wire_shape() {
        let req = ApplyRequest {
            wallet_address: AccountAddress::from_bytes([0xab; 20]),
            scholarship_id: ScholarshipId(5),
            application_data: ApplicationData {
                essay: "hello".into(),
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["wallet_address"], format!("0x{}", "ab".repeat(20)));
        assert_eq!(json["scholarshipId"], 5);
        assert_eq!(json["application_data"]["essay"], "hello");
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let data = ApplicationData {
            essay: "  one\ttwo\n\nthree  ".into(),
        };
        assert_eq!(data.word_count(), 3);
    }
}
