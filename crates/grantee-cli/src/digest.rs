//! # Digest Subcommand
//!
//! Prints the digest the ledger would record for a payload. `--essay`
//! treats the file as plain essay text and wraps it the way application
//! submissions are committed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use grantee_bridge::MIN_ESSAY_WORDS;
use grantee_core::{sha256_digest, CanonicalBytes};
use grantee_store_client::ApplicationData;

/// Arguments for `grantee digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// JSON payload, or essay text with `--essay`.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat FILE as essay text and digest `{"essay": <text>}`.
    #[arg(long)]
    pub essay: bool,

    /// Also print the canonical bytes that were hashed.
    #[arg(long)]
    pub canonical: bool,
}

/// Execute the digest subcommand.
pub fn run_digest(args: &DigestArgs) -> Result<u8> {
    let canonical = if args.essay {
        let data = read_essay(&args.file)?;
        let words = data.word_count();
        println!("words: {words}");
        if words < MIN_ESSAY_WORDS {
            println!("WARN: essay is below the {MIN_ESSAY_WORDS}-word minimum");
        }
        CanonicalBytes::new(&data)?
    } else {
        let value: serde_json::Value = crate::read_json(&args.file)?;
        CanonicalBytes::new(&value).context("failed to canonicalize payload")?
    };

    if args.canonical {
        println!("{}", canonical.as_str());
    }
    println!("{}", sha256_digest(&canonical));
    Ok(0)
}

fn read_essay(path: &Path) -> Result<ApplicationData> {
    let essay = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read essay: {}", path.display()))?;
    Ok(ApplicationData { essay })
}
