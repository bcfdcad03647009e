//! Command-line arguments

use clap::{Parser, Subcommand};

/// Céu Azul CLI
#[derive(Debug, Parser)]
#[command(name = "ceu-azul")]
#[command(author, version, about = "Céu Azul severe-weather alert client", long_about = None)]
pub struct Cli {
    /// Verbosity level; without it the configured log filter applies
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Backend URL (overrides `client.backend_url`)
    #[arg(short, long, global = true)]
    pub backend_url: Option<String>,

    /// Device database file (overrides `client.device_db_path`)
    #[arg(long, global = true)]
    pub device_db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Poll the backend for alerts until Ctrl+C
    ///
    /// Runs the foreground loop (every 30s by default, starting at once)
    /// and the background loop (every 5 minutes) side by side.
    Sync,

    /// Poll the backend once and show any new alerts
    SyncOnce,

    /// Verify a city, save it to the user's list and show its forecast
    Search {
        /// City name, e.g. "São Paulo"
        city: String,

        /// Day to narrate, 0 being the first day of the forecast
        #[arg(short, long, default_value_t = 0)]
        day: usize,

        /// Also narrate every 3-hour entry of the selected day
        #[arg(short, long)]
        entries: bool,
    },

    /// Show the last forecast cached on this device
    Offline {
        /// Day to narrate, 0 being the first day of the forecast
        #[arg(short, long, default_value_t = 0)]
        day: usize,

        /// Also narrate every 3-hour entry of the selected day
        #[arg(short, long)]
        entries: bool,
    },

    /// Print this device's user id, creating one if needed
    Whoami,
}

/// Log filter for a `-v` count, or `None` to keep the configured one
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}
