use std::fs;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clipdeck::auth::SessionGate;
use clipdeck::config::ServerConfig;
use clipdeck::resolver::UrlResolver;
use clipdeck::server::{AppState, create_router};
use clipdeck::store::{AdminStore, SqliteStore};

const ADMIN_PASSWORD_ENV: &str = "CLIPDECK_ADMIN_PASSWORD";
const SESSION_SECRET_ENV: &str = "CLIPDECK_SESSION_SECRET";
const SESSION_SECRET_BYTES: usize = 32;

#[cfg(unix)]
fn set_restrictive_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

/// Loads the token-signing secret. The environment wins; otherwise a
/// generated secret is persisted beside the database so issued credentials
/// survive restarts.
fn load_session_secret(config: &ServerConfig) -> anyhow::Result<Vec<u8>> {
    if let Ok(secret) = std::env::var(SESSION_SECRET_ENV) {
        if !secret.trim().is_empty() {
            return Ok(secret.into_bytes());
        }
    }

    let secret_file = config.session_secret_path();
    if secret_file.exists() {
        let encoded = fs::read_to_string(&secret_file)?;
        return hex::decode(encoded.trim())
            .with_context(|| format!("invalid session secret file: {}", secret_file.display()));
    }

    let mut bytes = [0u8; SESSION_SECRET_BYTES];
    rand::thread_rng().fill(&mut bytes);
    fs::write(&secret_file, hex::encode(bytes))?;

    #[cfg(unix)]
    set_restrictive_permissions(&secret_file);

    info!("Generated session secret at {}", secret_file.display());
    Ok(bytes.to_vec())
}

#[derive(Parser)]
#[command(name = "clipdeck")]
#[command(about = "A curation board for short-form video links", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for the database and generated secrets
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("clipdeck=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
            };

            let admin_password = match std::env::var(ADMIN_PASSWORD_ENV) {
                Ok(p) if !p.trim().is_empty() => p,
                _ => bail!("{ADMIN_PASSWORD_ENV} must be set to a non-empty admin password"),
            };

            fs::create_dir_all(&config.data_dir)?;
            let session_secret = load_session_secret(&config)?;

            let store = Arc::new(SqliteStore::new(config.db_path())?);
            store.initialize()?;

            let state = Arc::new(AppState {
                read_store: store.clone(),
                admin_store: store,
                sessions: SessionGate::new(admin_password, &session_secret),
                resolver: UrlResolver::new(),
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
