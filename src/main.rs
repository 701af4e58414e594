use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use statuslight::{App, AppConfig, EventSource, LogDrivers, Settings, StopReason, StreamSource};
use statuslight_core::{Clock, MonotonicClock};
use tokio::net::TcpStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "statuslight")]
#[command(about = "Status LEDs, health output and low voltage buzzer for a small vehicle")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read update events from a TCP endpoint (host:port) instead of stdin
    #[arg(long)]
    connect: Option<String>,

    /// Log filter, e.g. "debug" or "statuslight_core=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let settings = Settings::load(args.config.as_deref())?;
    let config = settings.validate()?;
    info!(gpios = ?config.gpios, "Configuration loaded");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    rt.block_on(run(args.connect, config))
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(connect: Option<String>, config: AppConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());

    let source: Box<dyn EventSource> = match connect {
        Some(addr) => {
            info!(%addr, "Connecting");
            let stream = TcpStream::connect(&addr)
                .await
                .with_context(|| format!("Failed to connect to {}", addr))?;
            Box::new(StreamSource::spawn(stream, &addr, clock.clone()))
        }
        None => Box::new(StreamSource::spawn(tokio::io::stdin(), "stdin", clock.clone())),
    };

    let mut app = App::new(&config, source, LogDrivers::new(), clock);
    let reason = app.run(ctrl_c()).await;
    if reason == StopReason::SourceClosed {
        info!("No more input");
    }
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C, running until end of input");
        std::future::pending::<()>().await;
    }
}
