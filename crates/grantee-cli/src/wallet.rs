//! # Wallet Subcommand
//!
//! secp256k1 key generation and EIP-191 personal-message signatures, the
//! same signatures a browser wallet produces for the store's signed
//! endpoints.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use grantee_core::AccountAddress;
use grantee_crypto::{recover_address, Credential, WalletKey, WalletSignature};

use crate::GlobalOpts;

/// Arguments for `grantee wallet`.
#[derive(Args, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

/// Wallet subcommands.
#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Generate a new key and write it as hex.
    Keygen {
        /// Output file for the private key.
        #[arg(long, short)]
        output: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the address of the configured key.
    Address,

    /// Sign MESSAGE as a personal message with the configured key.
    Sign {
        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    /// Check that SIGNATURE over MESSAGE was made by ADDRESS.
    Verify {
        /// Claimed signer.
        #[arg(long)]
        address: String,
        /// `0x`-prefixed 65-byte signature.
        #[arg(long)]
        signature: String,
        #[arg(value_name = "MESSAGE")]
        message: String,
    },
}

/// Execute the wallet subcommand.
pub fn run_wallet(args: &WalletArgs, opts: &GlobalOpts) -> Result<u8> {
    match &args.command {
        WalletCommand::Keygen { output, force } => cmd_keygen(output, *force),
        WalletCommand::Address => {
            println!("{}", opts.wallet_key()?.address());
            Ok(0)
        }
        WalletCommand::Sign { message } => {
            let credential = Credential::sign(&opts.wallet_key()?, message.as_str())?;
            println!("{}", credential.signature());
            Ok(0)
        }
        WalletCommand::Verify {
            address,
            signature,
            message,
        } => cmd_verify(address, signature, message),
    }
}

fn cmd_keygen(output: &Path, force: bool) -> Result<u8> {
    let key = WalletKey::generate();
    let mut file = create_key_file(output, force)?;
    file.write_all(key.to_secret_hex().as_bytes())
        .with_context(|| format!("failed to write private key: {}", output.display()))?;
    tracing::info!(path = %output.display(), "wallet key written");

    println!("OK: generated wallet key");
    println!("  Private key: {}", output.display());
    println!("  Address:     {}", key.address());
    Ok(0)
}

/// Open the key file for writing. Without `force` the open fails if anything,
/// including a dangling symlink, already occupies the path.
fn create_key_file(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    match options.open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!("refusing to overwrite {} (pass --force)", path.display())
        }
        Err(e) => {
            Err(e).with_context(|| format!("failed to create key file: {}", path.display()))
        }
    }
}

fn cmd_verify(address: &str, signature: &str, message: &str) -> Result<u8> {
    let claimed = AccountAddress::parse(address).context("invalid address")?;
    let signature = WalletSignature::from_hex(signature).context("invalid signature")?;
    match recover_address(message, &signature) {
        Ok(recovered) if recovered == claimed => {
            println!("OK: signature is valid");
            Ok(0)
        }
        Ok(recovered) => {
            println!("FAIL: signed by {recovered}, not {claimed}");
            Ok(1)
        }
        Err(e) => {
            println!("FAIL: signature verification failed: {e}");
            Ok(1)
        }
    }
}
