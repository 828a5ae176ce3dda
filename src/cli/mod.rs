//! Command-line interface for the parley-server binary.

use clap::Parser;
use std::path::PathBuf;

/// Parley - conversational proxy for text-completion endpoints
#[derive(Parser, Debug)]
#[command(
    name = "parley-server",
    version,
    about = "Parley - conversational proxy for text-completion endpoints",
    after_help = "EXAMPLES:\n    \
                  parley-server                        # Serve with parley.toml or defaults\n    \
                  parley-server --port 9000            # Override the listen port\n    \
                  parley-server --config my.toml -v    # Custom config, debug logging"
)]
pub struct Cli {
    /// Path to the configuration file (missing file means defaults)
    #[arg(short, long, default_value = "parley.toml")]
    pub config: PathBuf,

    /// Host address to bind
    #[arg(long, env = "PARLEY_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PARLEY_PORT")]
    pub port: Option<u16>,

    /// Log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shorthand for --log-level debug
    #[arg(short, long, conflicts_with = "log_level")]
    pub verbose: bool,

    /// Emit structured JSON logs
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Apply command-line overrides on top of the file configuration
    pub fn apply(&self, config: &mut parley::ParleyConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        } else if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = parley::utils::toml_config::LogFormat::Json;
        }
    }
}
