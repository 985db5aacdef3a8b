// SPDX-FileCopyrightText: 2026 Valet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Valet - a multi-component personal assistant.
//!
//! This is the binary entry point for the Valet server.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod serve;
mod status;

/// Valet - a multi-component personal assistant.
#[derive(Parser, Debug)]
#[command(name = "valet", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Valet API server.
    Serve,
    /// Show whether a running server is healthy.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match valet_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("valet: {e}");
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Some(Commands::Serve) | None => serve::run_serve(&config).await,
        Some(Commands::Status { json }) => status::run_status(&config, json).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "fatal error");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        super::Cli::command().debug_assert();
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = valet_config::load_config_from_str("")
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "valet");
        assert_eq!(config.server.port, 8000);
    }
}
