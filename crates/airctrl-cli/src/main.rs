//! AIRCTRL command-line binary.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use airctrl_cli::cli::{calibrate, evaluate, gesture, replay};
use airctrl_cli::{Cli, CliConfig, Commands};

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("airctrl failed: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    // JSON for log shipping, colored output otherwise
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    if let Ok(directive) = "airctrl=info".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    // Logs go to stderr so stdout stays clean for reports
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => CliConfig::load(Some(path)),
        None => CliConfig::from_env(),
    }
    .context("failed to load configuration")?;
    info!("Config: {:?}", config);

    match &cli.command {
        Commands::Replay(args) => print_json(&replay::run(args, &config)?),
        Commands::Calibrate(args) => print_json(&calibrate::run(args, &config)?),
        Commands::Evaluate(args) => print_json(&evaluate::run(args, &config)?),
        Commands::Gesture(args) => print_json(&gesture::run(args)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
