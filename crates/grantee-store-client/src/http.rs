//! Request plumbing shared by the sub-clients.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::StoreError;

/// Join a resource path onto the base URL, keeping any base path prefix.
pub(crate) fn resource_url(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

/// Send once. Transport failures (including timeouts) become `Http`.
pub(crate) async fn send(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, StoreError> {
    tracing::debug!(endpoint, "store request");
    request.send().await.map_err(|e| {
        tracing::warn!(endpoint, error = %e, "store call failed");
        StoreError::Http {
            endpoint: endpoint.into(),
            source: e,
        }
    })
}

/// Turn a non-2xx response into `ApiError`.
pub(crate) async fn ensure_success(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, StoreError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(endpoint, status, "store returned error status");
    Err(StoreError::ApiError {
        endpoint: endpoint.into(),
        status,
        body,
    })
}

pub(crate) async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, StoreError> {
    resp.json().await.map_err(|e| StoreError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
