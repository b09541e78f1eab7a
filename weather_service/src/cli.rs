//! Command-line interface definitions using clap derive API.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// In-memory per-city weather service
#[derive(Parser)]
#[command(name = "weather-service")]
#[command(about = "Stores and serves the latest weather observation per city")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to, overriding the configured host and port
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_accepts_address_override() {
        let cli =
            Cli::try_parse_from(["weather-service", "serve", "--addr", "0.0.0.0:9000"]).unwrap();
        match cli.command {
            Commands::Serve { addr } => {
                assert_eq!(addr, Some("0.0.0.0:9000".parse().unwrap()));
            }
            Commands::Config => panic!("expected serve"),
        }
    }

    #[test]
    fn serve_address_is_optional() {
        let cli = Cli::try_parse_from(["weather-service", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { addr: None }));
    }

    #[test]
    fn invalid_address_is_rejected() {
        assert!(Cli::try_parse_from(["weather-service", "serve", "--addr", "nowhere"]).is_err());
    }
}
