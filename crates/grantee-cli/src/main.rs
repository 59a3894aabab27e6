//! # grantee CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Logs go to stderr so command output on stdout stays scriptable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grantee_cli::digest::{run_digest, DigestArgs};
use grantee_cli::profile::{run_profile, ProfileArgs};
use grantee_cli::scholarship::{run_scholarship, ScholarshipArgs};
use grantee_cli::wallet::{run_wallet, WalletArgs};
use grantee_cli::GlobalOpts;

/// GranTEE bridge toolchain.
///
/// Computes and checks content commitments, signs personal messages with a
/// wallet key, and syncs the signed user profile with the off-chain store.
#[derive(Parser, Debug)]
#[command(name = "grantee", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Base URL of the off-chain store.
    #[arg(long, env = "GRANTEE_API_URL", global = true)]
    api_url: Option<String>,

    /// File holding the hex wallet key. Defaults to `GRANTEE_WALLET_KEY`.
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Canonical form and SHA-256 digest of a payload or essay.
    Digest(DigestArgs),

    /// Wallet key generation, addresses, and personal-message signatures.
    Wallet(WalletArgs),

    /// Signed profile pull and push.
    Profile(ProfileArgs),

    /// Check stored scholarship content against its ledger digest.
    Scholarship(ScholarshipArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "grantee CLI starting");

    let opts = GlobalOpts {
        api_url: cli.api_url,
        key_file: cli.key_file,
    };

    let result = match cli.command {
        Commands::Digest(args) => run_digest(&args),
        Commands::Wallet(args) => run_wallet(&args, &opts),
        Commands::Profile(args) => run_profile(&args, &opts),
        Commands::Scholarship(args) => run_scholarship(&args, &opts),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
