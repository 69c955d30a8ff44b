//! Replay a recorded input trace and print the resulting viewer events.
//!
//! ```text
//! stageview <trace.jsonl> [--config <config.json>] [--no-sensors]
//! ```
//!
//! Each event is printed as one JSON line, followed by the final control
//! signals. Set `RUST_LOG=stageview=trace` for per-touch detail.

use anyhow::{Context, Result, bail};
use stageview::config::{ViewerConfig, default_config_path};
use stageview::sensors::SensorCapabilities;
use stageview::trace::{Replay, load_trace};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage() -> &'static str {
    "usage: stageview <trace.jsonl> [--config <config.json>] [--no-sensors]"
}

struct Args {
    trace_path: PathBuf,
    config_path: Option<PathBuf>,
    sensors: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut trace_path = None;
    let mut config_path = None;
    let mut sensors = true;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--config" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    bail!("missing path after --config");
                };
                config_path = Some(PathBuf::from(path));
            }
            "--no-sensors" => sensors = false,
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(None);
            }
            value if value.starts_with('-') => bail!("unknown argument: {value}\n{}", usage()),
            value => {
                if trace_path.is_some() {
                    bail!("multiple trace paths provided");
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let Some(trace_path) = trace_path else {
        bail!("{}", usage());
    };
    Ok(Some(Args {
        trace_path,
        config_path,
        sensors,
    }))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = match args.config_path.or_else(default_config_path) {
        Some(path) => ViewerConfig::load_or_default(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let records = load_trace(&args.trace_path)
        .with_context(|| format!("reading trace {}", args.trace_path.display()))?;

    let capabilities = if args.sensors {
        SensorCapabilities::ALL
    } else {
        SensorCapabilities::NONE
    };
    let mut replay = Replay::new(config, capabilities);
    let outcome = replay.run(&records);

    for event in &outcome.events {
        println!("{}", serde_json::to_string(event)?);
    }
    if let Some(signals) = outcome.last_signals {
        println!("{}", serde_json::to_string(&signals)?);
    }
    tracing::info!(
        records = records.len(),
        frames = outcome.frames,
        events = outcome.events.len(),
        "Replay complete"
    );
    Ok(())
}
