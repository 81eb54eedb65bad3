//! CLI module - Command-line interface for Watchlist
//!
//! Besides `serve`, every subcommand is a one-shot bootstrap script.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a single-admin movie catalog
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Initialize the database
    Initdb {
        /// Drop all tables before creating them again
        #[arg(long)]
        drop: bool,
    },

    /// Generate fake data
    Forge,

    /// Create the admin account, or reset its credentials
    Admin {
        /// The username used to login
        #[arg(long)]
        username: Option<String>,
        /// The password used to login
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
