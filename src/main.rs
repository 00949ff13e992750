//! Demo binary: builds a logger from an environment name or config file and
//! emits a handful of representative records.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use fieldlog::config::{load_config, Settings};
use fieldlog::sink::TracingSink;
use fieldlog::{args, Logger, StructuredLogger};

#[derive(Parser)]
#[command(name = "fieldlog")]
#[command(about = "Emit sample structured log records", long_about = None)]
struct Cli {
    /// Environment name ("production" selects the production profile).
    #[arg(short, long, default_value = "development")]
    env: String,

    /// TOML config file; takes precedence over --env.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forward records to a tracing subscriber instead of writing directly.
    #[arg(long)]
    tracing: bool,

    /// Number of simulated requests.
    #[arg(short, long, default_value_t = 2)]
    requests: u32,
}

fn build_logger(settings: &Settings, use_tracing: bool) -> StructuredLogger {
    if !use_tracing {
        return StructuredLogger::from_settings(settings);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldlog=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    StructuredLogger::new(Arc::new(TracingSink::new()), settings.level)
        .with_caller(settings.caller)
        .with_stack_traces(settings.stack_traces)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => load_config(path)?.1,
        None => Settings::for_environment(&cli.env),
    };

    let logger = build_logger(&settings, cli.tracing);
    tracing::debug!(profile = ?settings.profile, level = %settings.level, "Logger configured");

    let service = logger.new_group("demo");
    service.info("starting", &args!["profile", settings.profile, "requests", cli.requests]);

    for attempt in 0..cli.requests {
        let request = service
            .new_group("request")
            .with(&args!["request_id", Uuid::new_v4(), "attempt", attempt]);
        request.debug("accepted", &[]);
        request.info("handled", &args!["status", 200, "elapsed_ms", 12]);
    }

    service.warning("malformed args", &args![42, "orphan"]);

    let err = io::Error::new(io::ErrorKind::NotFound, "settings.toml not found");
    service.error("load failed", Some(&err), &args!["path", "settings.toml"]);
    service.error("no error value", None, &[]);

    Ok(())
}
