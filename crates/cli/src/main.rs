//! `hoshmarket` binary.
//!
//! Reads schemas and form values from JSON files, runs one engine
//! operation and prints the result as pretty JSON on stdout. Logs go to
//! stderr.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hoshmarket_cli::{commands, config};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoshmarket_cli=info,hoshmarket_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = commands::command().get_matches();

    match run(&matches) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            ExitCode::from(commands::ERROR_EXIT_STATUS)
        }
    }
}

fn run(matches: &clap::ArgMatches) -> anyhow::Result<u8> {
    let engine_config = config::engine_config_from_env()?;
    let outcome = commands::run(matches, &engine_config)?;
    println!("{}", serde_json::to_string_pretty(&outcome.output)?);
    Ok(outcome.exit_status())
}
