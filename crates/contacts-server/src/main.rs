//! `server`: runs the contacts HTTP API.
//!
//! ```text
//! server [--config <path>] [serve]   # default
//! server hash-password < secret.txt  # print an argon2 PHC string
//! ```
//!
//! Configuration comes from a TOML file overlaid with `CONTACTS_*` environment
//! variables; see [`ServerConfig::load`].

use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context as _, anyhow};
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::{Parser, Subcommand};
use contacts_server::{ServerConfig, auth::AuthConfig};
use contacts_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Owner-scoped contacts API")]
struct Args {
  /// TOML configuration file; missing files fall back to defaults.
  #[arg(short, long, global = true, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the API (the default).
  Serve,
  /// Hash the first line of stdin for a `[[users]]` entry and exit.
  HashPassword,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  match args.command.unwrap_or(Command::Serve) {
    Command::HashPassword => hash_password(),
    Command::Serve => {
      init_tracing();
      serve(ServerConfig::load(&args.config)?).await
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn hash_password() -> anyhow::Result<()> {
  let input = io::read_to_string(io::stdin()).context("reading stdin")?;
  let password = input.lines().next().unwrap_or_default();
  if password.is_empty() {
    anyhow::bail!("expected a password on stdin");
  }

  let salt = SaltString::generate(&mut OsRng);
  let phc = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow!("hashing password: {e}"))?;
  println!("{phc}");
  Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  if config.users.is_empty() {
    tracing::warn!("no users configured; every request will be rejected");
  }

  let store = open_store(&config).await?;
  let auth = AuthConfig::from_users(&config.users);
  let app = contacts_server::router(Arc::new(store), Arc::new(auth));

  let listener = TcpListener::bind((config.host.as_str(), config.port))
    .await
    .with_context(|| format!("binding {}:{}", config.host, config.port))?;
  tracing::info!(addr = %listener.local_addr()?, "serving contacts API");

  axum::serve(listener, app).await.context("serving")
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let path = config.database_path();
  if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
  }

  let store = SqliteStore::open(&path)
    .await
    .with_context(|| format!("opening store at {}", path.display()))?;
  tracing::info!(path = %path.display(), "opened contact store");
  Ok(store)
}
