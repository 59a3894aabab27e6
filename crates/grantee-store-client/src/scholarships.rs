//! # Scholarship Content
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/scholarship/{id}` | Fetch content, wrapped as `{"scholarship": {...}}` |
//! | POST   | `/scholarship` | Upload content keyed by the ledger-issued id |
//!
//! ## Commitment Boundary
//!
//! [`ScholarshipContent`] is exactly what the ledger commits to. `id` and
//! `applicants` travel in the same document but sit outside the commitment:
//! `id` is the subject itself, and `applicants` is a counter the store
//! maintains.

use grantee_core::{ScholarshipId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StoreError;
use crate::http::{decode, ensure_success, resource_url, send};

/// The committed description of a scholarship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScholarshipContent {
    pub title: String,
    pub description: String,
    /// Largest grant per applicant, in wei.
    pub max_amount_per_applicant: u64,
    /// Deadline as entered by the creator.
    pub deadline: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// A scholarship document as stored off-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarshipDocument {
    /// Ledger-issued id. Sent as a string; either form is accepted back.
    #[serde(with = "id_repr")]
    pub id: ScholarshipId,
    /// Applicant count maintained by the store.
    #[serde(default)]
    pub applicants: u64,
    /// When the store persisted the document, if it reports it.
    #[serde(
        rename = "storedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stored_at: Option<Timestamp>,
    #[serde(flatten)]
    pub content: ScholarshipContent,
}

#[derive(Debug, Deserialize)]
struct ScholarshipEnvelope {
    #[serde(default)]
    scholarship: Option<ScholarshipDocument>,
}

mod id_repr {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub(super) fn serialize<S: Serializer>(id: &ScholarshipId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&id.to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ScholarshipId, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Number(n) => Ok(ScholarshipId(n)),
            Repr::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(ScholarshipId)
                .map_err(|_| serde::de::Error::custom(format!("invalid scholarship id {s:?}"))),
        }
    }
}

// -- Client -------------------------------------------------------------------

/// Client for scholarship content.
#[derive(Debug, Clone)]
pub struct ScholarshipClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ScholarshipClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch a scholarship document.
    ///
    /// Returns `Ok(None)` on 404 or when the envelope carries no document.
    /// A document whose `id` differs from the requested one is `Malformed`.
    pub async fn get(&self, id: ScholarshipId) -> Result<Option<ScholarshipDocument>, StoreError> {
        let endpoint = format!("GET /scholarship/{id}");
        let url = resource_url(&self.base_url, &format!("scholarship/{id}"));
        let resp = send(&endpoint, self.http.get(&url)).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = ensure_success(&endpoint, resp).await?;
        let envelope: ScholarshipEnvelope = decode(&endpoint, resp).await?;
        match envelope.scholarship {
            Some(doc) if doc.id != id => Err(StoreError::Malformed {
                endpoint,
                reason: format!("requested scholarship {id}, store returned {}", doc.id),
            }),
            other => Ok(other),
        }
    }

    /// Upload a scholarship document.
    pub async fn put(&self, doc: &ScholarshipDocument) -> Result<(), StoreError> {
        let endpoint = "POST /scholarship";
        let url = resource_url(&self.base_url, "scholarship");
        let resp = send(endpoint, self.http.post(&url).json(doc)).await?;
        ensure_success(endpoint, resp).await?;
        Ok(())
    }
}
