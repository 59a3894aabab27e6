//! # grantee-cli — Command-Line Access to the GranTEE Bridge
//!
//! Provides the `grantee` binary for operators and applicants who need to
//! check commitments or exercise the store's signed endpoints outside the
//! web client.
//!
//! ## Subcommands
//!
//! - `grantee digest`: Canonical form and digest of a JSON payload or essay.
//! - `grantee wallet`: Key generation, addresses, personal-message signatures.
//! - `grantee profile`: Signed profile pull and push.
//! - `grantee scholarship`: Check stored content against a ledger digest.
//!
//! ## Configuration
//!
//! | Variable | Flag | Used by |
//! |----------|------|---------|
//! | `GRANTEE_API_URL` | `--api-url` | `profile`, `scholarship` |
//! | `GRANTEE_TIMEOUT_SECS` | | `profile`, `scholarship` |
//! | `GRANTEE_WALLET_KEY` | `--key-file` | `wallet`, `profile` |
//!
//! The wallet key is read into zeroizing buffers and never echoed.

pub mod digest;
pub mod profile;
pub mod scholarship;
pub mod wallet;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use grantee_crypto::WalletKey;
use grantee_store_client::{StoreClient, StoreConfig};
use zeroize::Zeroizing;

/// Environment variable holding the hex wallet key.
pub const WALLET_KEY_ENV: &str = "GRANTEE_WALLET_KEY";

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Store base URL; falls back to `GRANTEE_API_URL`.
    pub api_url: Option<String>,
    /// File holding the hex wallet key; falls back to `GRANTEE_WALLET_KEY`.
    pub key_file: Option<PathBuf>,
}

impl GlobalOpts {
    /// Load the wallet key from `--key-file` or the environment.
    pub fn wallet_key(&self) -> Result<WalletKey> {
        let hex = match &self.key_file {
            Some(path) => read_secret(path)?,
            None => Zeroizing::new(std::env::var(WALLET_KEY_ENV).with_context(|| {
                format!("no wallet key: pass --key-file or set {WALLET_KEY_ENV}")
            })?),
        };
        WalletKey::from_hex(&hex).context("invalid wallet key")
    }

    /// Build a store client from `--api-url` or the environment.
    pub fn store(&self) -> Result<StoreClient> {
        let config = match &self.api_url {
            Some(url) => StoreConfig::from_parts(
                url,
                std::env::var("GRANTEE_TIMEOUT_SECS").ok().as_deref(),
            ),
            None => StoreConfig::from_env(),
        }?;
        tracing::debug!(api_url = %config.api_url, "store configured");
        Ok(StoreClient::new(config)?)
    }
}

fn read_secret(path: &Path) -> Result<Zeroizing<String>> {
    if !path.exists() {
        bail!("key file not found: {}", path.display());
    }
    let raw = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read key file: {}", path.display()))?,
    );
    Ok(Zeroizing::new(raw.trim().to_string()))
}

/// Read and parse a JSON file.
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse JSON: {}", path.display()))
}

/// A single-threaded runtime for the network subcommands.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
