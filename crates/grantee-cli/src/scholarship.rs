//! # Scholarship Subcommand
//!
//! Fetches a scholarship's stored description and checks it against the
//! digest recorded on the ledger. The ledger digest is supplied by the
//! operator; this command reads only the store.
//!
//! Exit codes: `0` trusted, `1` mismatch, `2` content unavailable.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use grantee_bridge::{ContentTrust, UnavailableCause};
use grantee_core::{digest_payload, ContentDigest, ScholarshipId};
use grantee_store_client::{ScholarshipContent, StoreClient};

use crate::GlobalOpts;

/// Arguments for `grantee scholarship`.
#[derive(Args, Debug)]
pub struct ScholarshipArgs {
    #[command(subcommand)]
    pub command: ScholarshipCommand,
}

/// Scholarship subcommands.
#[derive(Subcommand, Debug)]
pub enum ScholarshipCommand {
    /// Compare stored content for ID with the ledger's content digest.
    Check {
        #[arg(value_name = "ID")]
        id: u64,
        /// Content digest recorded on the ledger (64 hex chars).
        #[arg(long)]
        digest: String,
        /// Print the content when it matches.
        #[arg(long)]
        show: bool,
    },
}

/// Execute the scholarship subcommand.
pub fn run_scholarship(args: &ScholarshipArgs, opts: &GlobalOpts) -> Result<u8> {
    match &args.command {
        ScholarshipCommand::Check { id, digest, show } => {
            let expected = ContentDigest::from_hex(digest).context("invalid digest")?;
            let store = opts.store()?;
            let rt = crate::runtime()?;
            let (trust, content) = rt.block_on(check(&store, ScholarshipId(*id), expected))?;
            report(ScholarshipId(*id), &trust, content.as_ref(), *show)
        }
    }
}

async fn check(
    store: &StoreClient,
    id: ScholarshipId,
    expected: ContentDigest,
) -> Result<(ContentTrust, Option<ScholarshipContent>)> {
    let doc = match store.scholarships().get(id).await {
        Ok(Some(doc)) => doc,
        Ok(None) => {
            return Ok((ContentTrust::unavailable(UnavailableCause::NotFound), None));
        }
        Err(e) => {
            tracing::warn!(%id, error = %e, "scholarship content unavailable");
            return Ok((ContentTrust::unavailable(&e), None));
        }
    };
    let trust = ContentTrust::compare(expected, digest_payload(&doc.content)?);
    Ok((trust, Some(doc.content)))
}

fn report(
    id: ScholarshipId,
    trust: &ContentTrust,
    content: Option<&ScholarshipContent>,
    show: bool,
) -> Result<u8> {
    match trust {
        ContentTrust::Trusted => {
            println!("OK: scholarship {id} content matches its commitment");
            if let (true, Some(content)) = (show, content) {
                println!("{}", serde_json::to_string_pretty(content)?);
            }
            Ok(0)
        }
        ContentTrust::Mismatch { expected, actual } => {
            println!("FAIL: scholarship {id} content does not match its commitment");
            println!("  committed: {expected}");
            println!("  stored:    {actual}");
            Ok(1)
        }
        ContentTrust::Unavailable { cause } => {
            println!("UNAVAILABLE: scholarship {id}: {cause}");
            Ok(2)
        }
    }
}
