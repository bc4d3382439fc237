//! Basis quoting bot - Entry Point
//!
//! Replays a JSON-lines venue event stream through the strategy and writes
//! the resulting actions as JSON lines.

use anyhow::Result;
use basis_bot::{spawn_replay, AppConfig, Application};
use clap::Parser;
use tracing::{debug, info};

/// Future/ETF basis quoting bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via BASIS_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Event input file, overrides `replay.input`
    #[arg(short, long)]
    input: Option<String>,

    /// Action output file, overrides `replay.output`
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    basis_telemetry::init_logging()?;

    info!("Starting basis bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > BASIS_CONFIG env var > default
    let explicit_path = args
        .config
        .or_else(|| std::env::var("BASIS_CONFIG").ok());
    let mut config = match &explicit_path {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            AppConfig::from_file(path)?
        }
        None => AppConfig::load_or_default("config/default.toml")?,
    };

    if let Some(input) = args.input {
        config.replay.input = Some(input);
    }
    if let Some(output) = args.output {
        config.replay.output = Some(output);
    }

    let sink = Application::output_sink(&config).await?;
    let input = Application::open_input(&config).await?;
    let app = Application::new(config, sink)?;

    let (event_tx, event_rx) = app.event_channel();
    let replay = spawn_replay(input, event_tx);

    app.run(event_rx).await?;

    // Interrupted runs leave the reader pending
    replay.abort();
    match replay.await {
        Ok(result) => {
            result?;
        }
        Err(e) if e.is_cancelled() => debug!("Replay task cancelled"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
