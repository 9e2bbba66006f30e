//! Traceflow CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use traceflow_cli::{Args, error_adapter::to_reportable};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Traceflow");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = traceflow_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        match reporter.render_report(&mut writer, to_reportable(&err).as_ref()) {
            Ok(()) => error!("{writer}"),
            Err(_) => error!(err:err; "Traceflow failed"),
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
