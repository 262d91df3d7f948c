//! Command-line interface.
//!
//! - `serve` (default) - run the HTTP API
//! - `seed` - insert the sample hotels and exit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "hotel-booking")]
#[command(author, version, about = "Hotel booking demo API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "HOTEL_BOOKING_CONFIG", default_value = "hotel-booking.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Database connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database name reported by diagnostics
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Subcommand to run (if none, starts the server)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API
    Serve,
    /// Insert the sample hotels into the configured database and exit
    Seed,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            port: self.port,
            database_url: self.database_url.clone(),
            database_name: self.database_name.clone(),
            log_level: self.log_level.clone(),
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
