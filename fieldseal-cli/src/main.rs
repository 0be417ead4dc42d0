//! `fieldseal` CLI tool for key provisioning and one-off field operations.

#![warn(clippy::pedantic, clippy::nursery)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fieldseal::prelude::*;
use fieldseal_key_file::FileKeyProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fieldseal")]
#[command(about = "fieldseal field encryption CLI", long_about = None)]
struct Cli {
    /// Directory containing key files
    #[arg(long, global = true, env = "FIELDSEAL_KEY_DIR", default_value = "./keys")]
    keys: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "FIELDSEAL_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate new encryption and blind index keys
    Keygen {
        /// Output directory for keys (defaults to --keys)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encrypt a value and print it as URL-safe base64
    Encrypt {
        /// Plaintext to encrypt
        plaintext: String,
    },
    /// Decrypt a URL-safe base64 value
    Decrypt {
        /// Ciphertext as printed by `encrypt`
        ciphertext: String,
    },
    /// Print the blind index of a value
    Hash {
        /// Plaintext to index
        plaintext: String,
    },
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}

fn load_registry(key_dir: &Path) -> Result<Arc<KeyRegistry>> {
    let provider = FileKeyProvider::new(key_dir)
        .with_context(|| format!("failed to open key directory {}", key_dir.display()))?;
    let registry = provider.load_registry().context("failed to load keys")?;
    tracing::debug!(key_dir = %key_dir.display(), keys = registry.len(), "loaded key registry");
    Ok(Arc::new(registry))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Keygen { output } => {
            let dir = output.unwrap_or(cli.keys);
            FileKeyProvider::init(&dir)
                .with_context(|| format!("failed to initialise keys in {}", dir.display()))?;
            println!("Generated keys in: {}", dir.display());
        }
        Commands::Encrypt { plaintext } => {
            let cipher = FieldCipher::new(load_registry(&cli.keys)?);
            let ciphertext = cipher.encrypt(&plaintext).context("encryption failed")?;
            println!("{}", ciphertext.to_text());
        }
        Commands::Decrypt { ciphertext } => {
            let cipher = FieldCipher::new(load_registry(&cli.keys)?);
            let ciphertext = Ciphertext::from_text(ciphertext.trim())?;
            let plaintext = cipher.decrypt(ciphertext.as_bytes()).context("decryption failed")?;
            println!("{plaintext}");
        }
        Commands::Hash { plaintext } => {
            let indexer = BlindIndexer::new(load_registry(&cli.keys)?);
            println!("{}", indexer.encode_text(&plaintext).context("hashing failed")?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    run(cli)
}
