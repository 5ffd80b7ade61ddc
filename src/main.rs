//! Interview Coach Server
//!
//! HTTP backend for the interview coach chat UI: transcript analysis,
//! speech-to-text and static file serving.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use interview_coach::models::settings::{AppConfig, SettingsUpdate};
use interview_coach::server::start_server;

#[derive(Parser)]
#[command(name = "interview-coach")]
#[command(about = "Interview Coach backend server")]
#[command(version)]
struct Args {
    /// Server bind address (overrides BIND_ADDR / PORT)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Directory with the front-end bundle (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over both presets
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("interview_coach=debug,interview_coach_llm=debug,tower_http=debug,warn")
        } else {
            EnvFilter::new("interview_coach=info,tower_http=info,warn")
        }
    });
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let mut config = AppConfig::from_env()?;
    config.apply_update(SettingsUpdate {
        bind_addr: args.bind.map(|addr| addr.to_string()),
        static_dir: args.static_dir,
    });

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        "starting Interview Coach server"
    );

    start_server(config).await
}
