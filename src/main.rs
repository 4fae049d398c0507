//! Worker configuration CLI entry point.
//!
//! Resolves the worker configuration from `-c/--conf` and the remaining
//! flags, then writes the wire encoding to stdout.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use worker_config::infrastructure::logging::{LogConfig, LogFormat, LoggerImpl};
use worker_config::{resolve_from_args, FlagError, SystemHome};

fn main() -> ExitCode {
    let log_config = LogConfig {
        format: LogFormat::Pretty,
        ..LogConfig::default()
    };
    let _logger = match LoggerImpl::init(&log_config) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("worker configuration failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let resolved = match resolve_from_args("worker-config", std::env::args_os(), &SystemHome) {
        Ok(resolved) => resolved,
        Err(FlagError::Invalid(err)) => err.exit(),
        Err(err) => return Err(err).context("couldn't resolve worker configuration"),
    };

    let config = &resolved.config;
    info!(
        environment = %config.environment,
        zone = %config.worker.network.zone,
        coordinator = %config.worker.network.coordinator_address,
        storage = %config.emulator.storage,
        loaded = config.is_loaded(),
        "worker configuration resolved"
    );

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&config.encode())
        .and_then(|()| stdout.write_all(b"\n"))
        .context("Failed to write configuration to stdout")?;

    Ok(())
}
