//! Centime command-line front end.
//!
//! Parses, formats, and balances amounts using the engine configuration
//! loaded from `config/` and `CENTIME__*` environment variables.

mod args;
mod commands;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use centime_core::CurrencyRegistry;
use centime_shared::{AppError, EngineConfig};

fn run() -> anyhow::Result<String> {
    let config = EngineConfig::load()?;
    let registry = CurrencyRegistry::global();
    commands::apply_config(&config, registry)?;

    let command = args::parse_args(std::env::args().skip(1))?;
    Ok(commands::execute(command, &config, registry)?)
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "centime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => match err.downcast_ref::<AppError>() {
            Some(app) => {
                error!(code = app.error_code(), "Command failed");
                eprintln!("error[{}]: {app}", app.error_code());
                ExitCode::from(u8::try_from(app.exit_code()).unwrap_or(1))
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}
