// SPDX-FileCopyrightText: 2026 Revlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Revlens - Product review analyzer.
//!
//! This is the binary entry point: it loads configuration, installs logging,
//! and dispatches to the selected subcommand.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use revlens_config::model::RevlensConfig;

/// Revlens - Product review analyzer.
#[derive(Parser, Debug)]
#[command(name = "revlens", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Create the reviews table if missing and exit.
    InitDb,
    /// Print the effective configuration as TOML, secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => revlens_config::load_and_validate_path(path),
        None => revlens_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            revlens_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            init_tracing(&config.server.log_level);
            serve::run_serve(config).await
        }
        Commands::InitDb => {
            init_tracing(&config.server.log_level);
            serve::run_init_db(&config).await
        }
        Commands::Config => print_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &RevlensConfig) -> Result<(), revlens_core::RevlensError> {
    let rendered = toml::to_string(&config.redacted())
        .map_err(|e| revlens_core::RevlensError::Config(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `log_level`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("revlens={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc can advance the epoch; the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["revlens"]).unwrap();
        assert_eq!(cli.command.unwrap_or(Commands::Serve), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_subcommands_and_config_flag() {
        let cli = Cli::try_parse_from(["revlens", "init-db", "--config", "/tmp/r.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::InitDb));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/r.toml")));

        let cli = Cli::try_parse_from(["revlens", "config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Config));

        assert!(Cli::try_parse_from(["revlens", "shell"]).is_err());
    }

    #[test]
    fn redacted_config_renders_as_toml() {
        let config = revlens_config::load_and_validate_str(
            r#"
[gemini]
api_key = "secret-gemini-key"

[sentiment]
api_token = "hf_secret"
"#,
        )
        .unwrap();
        let rendered = toml::to_string(&config.redacted()).unwrap();
        assert!(!rendered.contains("secret-gemini-key"));
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("[redacted]"));
        assert!(rendered.contains("port = 5000"));
    }
}
