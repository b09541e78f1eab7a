//! Main entry point for the weather service CLI.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use weather_service::{
    cli,
    server::{self, AppState},
    settings::Settings,
    telemetry, WeatherStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = cli::Cli::parse();

    // Load settings
    let mut settings = Settings::load()?;

    match args.command {
        cli::Commands::Serve { addr } => {
            if let Some(addr) = addr {
                settings.server.host = addr.ip().to_string();
                settings.server.port = addr.port();
                settings.validate()?;
            }

            telemetry::init(&settings.logging)?;

            // The store lives for the whole process and is dropped on exit.
            let state = AppState::new(Arc::new(WeatherStore::new()));
            server::serve(state, &settings.server).await
        }
        cli::Commands::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}
