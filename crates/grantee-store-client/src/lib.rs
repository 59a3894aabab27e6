//! # grantee-store-client — Typed Client for the Off-Chain Store
//!
//! The store holds descriptive content the ledger only commits to:
//!
//! - **Scholarships** via `GET /scholarship/{id}` and `POST /scholarship`
//! - **User profiles** via `GET /user/{address}?signature=` and `POST /user`
//! - **Applications** via `POST /apply`, which hands an essay to the
//!   review agent
//!
//! ## Trust
//!
//! Nothing this crate returns is trusted. Content is verified against a
//! ledger commitment by the caller. This crate only guarantees that every
//! response matched its typed contract; anything else is an error.
//!
//! ## Retries
//!
//! None. A failed call is reported once and the caller decides.

pub mod applications;
pub mod config;
pub mod error;
pub(crate) mod http;
pub mod scholarships;
pub mod users;

pub use applications::{ApplicationData, ApplyRequest};
pub use config::{ConfigError, StoreConfig};
pub use error::StoreError;
pub use scholarships::{ScholarshipContent, ScholarshipDocument};
pub use users::{PostUserRequest, UserProfile};

use std::time::Duration;

/// Top-level store client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct StoreClient {
    scholarships: scholarships::ScholarshipClient,
    users: users::UserClient,
    applications: applications::ApplicationClient,
}

impl StoreClient {
    /// Create a client from configuration.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            scholarships: scholarships::ScholarshipClient::new(
                http.clone(),
                config.api_url.clone(),
            ),
            users: users::UserClient::new(http.clone(), config.api_url.clone()),
            applications: applications::ApplicationClient::new(http, config.api_url),
        })
    }

    /// Scholarship content.
    pub fn scholarships(&self) -> &scholarships::ScholarshipClient {
        &self.scholarships
    }

    /// Signed user profiles.
    pub fn users(&self) -> &users::UserClient {
        &self.users
    }

    /// Application hand-off to the review agent.
    pub fn applications(&self) -> &applications::ApplicationClient {
        &self.applications
    }
}
