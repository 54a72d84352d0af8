//! Command-line interface definitions for tanker_watch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options can also be supplied through environment variables.

use clap::{Parser, Subcommand};

/// Command-line arguments for tanker_watch.
///
/// # Examples
///
/// ```sh
/// # Serve the dashboard on the default address
/// tanker_watch
///
/// # Serve on another address with a custom source list
/// tanker_watch --config sources.yaml serve --bind 0.0.0.0:8080
///
/// # Print a one-off report to the terminal
/// tanker_watch report
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML file overriding sources, keywords and timeouts
    #[arg(short, long, env = "TANKER_WATCH_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the dashboard page (the default)
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "TANKER_WATCH_BIND", default_value = DEFAULT_BIND)]
        bind: String,
    },
    /// Run the aggregation once and print a report to stdout
    Report,
}

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

impl Cli {
    /// The chosen subcommand, defaulting to `serve` on [`DEFAULT_BIND`].
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            bind: DEFAULT_BIND.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::parse_from(["tanker_watch"]);
        assert_eq!(cli.config, None);
        assert_eq!(
            cli.command(),
            Command::Serve {
                bind: DEFAULT_BIND.to_string()
            }
        );
    }

    #[test]
    fn test_cli_serve_with_bind_and_config() {
        let cli = Cli::parse_from([
            "tanker_watch",
            "--config",
            "./sources.yaml",
            "serve",
            "--bind",
            "0.0.0.0:8080",
        ]);
        assert_eq!(cli.config.as_deref(), Some("./sources.yaml"));
        assert_eq!(
            cli.command(),
            Command::Serve {
                bind: "0.0.0.0:8080".to_string()
            }
        );
    }

    #[test]
    fn test_cli_report_short_config_flag() {
        let cli = Cli::parse_from(["tanker_watch", "-c", "/etc/tw.yaml", "report"]);
        assert_eq!(cli.config.as_deref(), Some("/etc/tw.yaml"));
        assert_eq!(cli.command(), Command::Report);
    }
}
