//! extreg CLI - azd extension registry tooling
//!
//! Entry point for the `extreg` command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // rustls 0.23+ needs a process-wide crypto provider before any TLS
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Aggregate(args) => commands::aggregate::run(args, config_path).await,
        Commands::Validate(args) => commands::validate::run(args, config_path).await,
        Commands::Readme(args) => commands::readme::run(args, config_path),
        Commands::Config(cmd) => commands::config::run(cmd, config_path),
    }
}

/// Logs go to stderr so stdout carries only the report and status lines
///
/// `EXTREG_LOG` takes a full `EnvFilter` directive and wins over `-v`/`-q`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    // HTTP stack internals stay at warn unless EXTREG_LOG asks for them
    let filter = EnvFilter::try_from_env("EXTREG_LOG").unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn",
            level
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
