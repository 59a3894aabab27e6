//! # Profile Subcommand
//!
//! Signed reads and writes of the configured account's store profile.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Subcommand};
use grantee_bridge::{LocalWallet, ProfileSync, SignatureAuthenticator};
use grantee_store_client::UserProfile;

use crate::GlobalOpts;

/// Arguments for `grantee profile`.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Fetch and print the profile.
    Pull,

    /// Upload a profile from a JSON file.
    Push {
        /// Profile JSON: `github`, `linkedIn`, `google`, `twitter`.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Execute the profile subcommand.
pub fn run_profile(args: &ProfileArgs, opts: &GlobalOpts) -> Result<u8> {
    let wallet = Arc::new(LocalWallet::new(opts.wallet_key()?));
    let sync = ProfileSync::new(SignatureAuthenticator::new(wallet), opts.store()?);
    let rt = crate::runtime()?;
    match &args.command {
        ProfileCommand::Pull => rt.block_on(pull(&sync)),
        ProfileCommand::Push { file } => {
            let profile: UserProfile = crate::read_json(file)?;
            rt.block_on(push(&sync, &profile))
        }
    }
}

async fn pull(sync: &ProfileSync) -> Result<u8> {
    match sync.pull().await? {
        Some(profile) => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(0)
        }
        None => {
            println!("no profile stored for this account");
            Ok(1)
        }
    }
}

async fn push(sync: &ProfileSync, profile: &UserProfile) -> Result<u8> {
    sync.push(profile).await?;
    println!("OK: profile uploaded");
    Ok(0)
}
