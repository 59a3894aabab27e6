//! # Signed User Profiles
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/user/{address}?signature=0x...` | Read a profile, authorized by a signature |
//! | POST   | `/user` | Write a profile: `{wallet_address, signature, data}` |
//!
//! The store verifies every call by recovering the signer from `signature`.
//! For reads the signed message is the lower-case address; for writes it is
//! `data` itself, a JSON string of the profile.

use grantee_core::AccountAddress;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::http::{decode, ensure_success, resource_url, send};

/// Social links a user keeps off-chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub github: String,
    #[serde(default, rename = "linkedIn")]
    pub linked_in: String,
    #[serde(default)]
    pub google: String,
    #[serde(default)]
    pub twitter: String,
}

/// Body of `POST /user`.
#[derive(Debug, Clone, Serialize)]
pub struct PostUserRequest {
    pub wallet_address: AccountAddress,
    /// `0x`-prefixed 65-byte signature over `data`.
    pub signature: String,
    /// The exact string that was signed.
    pub data: String,
}

/// `data` is returned either as an object or as the JSON string that was
/// originally posted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileData {
    Object(UserProfile),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    data: Option<ProfileData>,
}

/// Client for user profiles.
#[derive(Debug, Clone)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl UserClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Read a profile. Returns `Ok(None)` on 404 or an empty `data` field.
    pub async fn get(
        &self,
        address: AccountAddress,
        signature: &str,
    ) -> Result<Option<UserProfile>, StoreError> {
        let endpoint = "GET /user/{address}";
        let url = resource_url(&self.base_url, &format!("user/{address}"));
        let request = self.http.get(&url).query(&[("signature", signature)]);
        let resp = send(endpoint, request).await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = ensure_success(endpoint, resp).await?;
        let envelope: UserEnvelope = decode(endpoint, resp).await?;
        match envelope.data {
            None => Ok(None),
            Some(ProfileData::Object(profile)) => Ok(Some(profile)),
            Some(ProfileData::Encoded(raw)) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Malformed {
                    endpoint: endpoint.into(),
                    reason: format!("profile data is not a profile object: {e}"),
                }),
        }
    }

    /// Write a profile.
    pub async fn post(&self, req: &PostUserRequest) -> Result<(), StoreError> {
        let endpoint = "POST /user";
        let url = resource_url(&self.base_url, "user");
        let resp = send(endpoint, self.http.post(&url).json(req)).await?;
        ensure_success(endpoint, resp).await?;
        Ok(())
    }
}
