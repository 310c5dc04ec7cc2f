//! Command-line interface: the proxy server plus a terminal client for it.

mod commands;

use clap::{Parser, Subcommand};

/// Weathervane - weather lookup proxy with search history
#[derive(Parser)]
#[command(name = "weathervane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP proxy server
    #[command(alias = "server", alias = "web")]
    Serve,

    /// Show current weather, a 5-day forecast and recent searches for a city
    #[command(alias = "l", alias = "w")]
    Lookup {
        /// City name, e.g. "London" or "Paris, FR"
        #[arg(required = true)]
        city: Vec<String>,
    },

    /// Show the daily forecast for a city
    #[command(alias = "f")]
    Forecast {
        #[arg(required = true)]
        city: Vec<String>,
    },

    /// Show recently searched cities
    #[command(alias = "h")]
    History {
        /// Only show this city
        #[arg(long)]
        city: Option<String>,
    },

    /// Pick a city from autocomplete suggestions, then look it up
    #[command(alias = "s")]
    Search {
        /// Start of a city name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
