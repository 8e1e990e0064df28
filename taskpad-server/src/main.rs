use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskpad_server::db;
use taskpad_server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(name = "taskpad-server", version, about = "HTTP server for taskpad")]
struct Args {
    /// Host to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 3030)]
    port: u16,

    /// Database file path (default: ~/.taskpad/taskpad.db, or $TASKPAD_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Allow requests from any origin
    #[arg(long)]
    cors_permissive: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        // Debug mode: set debug level unless RUST_LOG is explicitly set
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

fn default_db_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".taskpad").join("taskpad.db"))
        .ok_or_else(|| anyhow!("could not determine home directory; pass --db"))
}

fn resolve_db_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os("TASKPAD_DB") {
        return Ok(PathBuf::from(path));
    }
    default_db_path()
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug).ok();

    let db_path = resolve_db_path(args.db)?;
    let pool = db::connect(&db_path)
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    db::run_migrations(&pool).await?;

    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("invalid bind address")?;

    run_server(
        pool,
        ServerConfig {
            bind_addr,
            cors_permissive: args.cors_permissive,
        },
    )
    .await
    .context("server error")?;

    Ok(())
}
