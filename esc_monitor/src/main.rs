//! # ESC Monitor Binary
//!
//! # Usage
//!
//! ```bash
//! # Built-in defaults, simulated sensors
//! esc_monitor --simulate
//!
//! # Host telemetry snapshot with a config file
//! esc_monitor --config /etc/esc/monitor.toml --telemetry /run/esc/telemetry.json
//!
//! # Verbose JSON logs
//! esc_monitor -c monitor.toml -v --json
//! ```

use clap::Parser;
use esc_common::config::MonitorConfig;
use esc_monitor::error::MonitorError;
use esc_monitor::sources::{simulation, telemetry};
use esc_monitor::{EscMonitor, SourceRegistry, SystemClock};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// ESC Monitor - per-channel ESC temperature alarms with hysteresis
#[derive(Parser, Debug)]
#[command(name = "esc_monitor")]
#[command(version)]
#[command(about = "Per-channel ESC temperature alarms with hysteresis and periodic status reports")]
#[command(long_about = None)]
struct Args {
    /// Path to monitor configuration (monitor.toml). Built-in defaults if omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force the simulation source
    #[arg(short = 's', long, conflicts_with = "telemetry")]
    simulate: bool,

    /// Read temperatures from this telemetry snapshot file
    #[arg(long, value_name = "FILE")]
    telemetry: Option<PathBuf>,

    /// Override the number of monitored channels
    #[arg(short = 'n', long, value_name = "N")]
    channels: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("ESC monitor startup failed: {}", e);
        eprintln!("esc_monitor: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), MonitorError> {
    let args = Args::parse();

    let config = load_config(&args)?;
    setup_tracing(&args, &config);

    info!("ESC monitor v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        info!("Loaded configuration from {}", path.display());
    }

    let registry = SourceRegistry::with_builtin_sources();
    let mut monitor = EscMonitor::from_config(&config, &registry)?;

    let running = monitor.running_flag();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|e| MonitorError::Signal(e.to_string()))?;

    monitor.run(&SystemClock::new());

    info!("ESC monitor shutdown complete");
    Ok(())
}

/// Load the config file (or defaults) and apply CLI overrides.
fn load_config(args: &Args) -> Result<MonitorConfig, MonitorError> {
    let mut config = match &args.config {
        Some(path) => MonitorConfig::from_file(path)?,
        None => MonitorConfig::default(),
    };

    if args.simulate {
        config.sampler.source = simulation::SOURCE_NAME.to_string();
    }
    if let Some(path) = &args.telemetry {
        config.sampler.source = telemetry::SOURCE_NAME.to_string();
        config.sampler.telemetry_path = path.clone();
    }
    if let Some(count) = args.channels {
        config.channels.count = count;
    }

    config.validate()?;
    Ok(config)
}

/// Setup tracing subscriber from config and CLI arguments.
fn setup_tracing(args: &Args, config: &MonitorConfig) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::from(config.shared.log_level)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
