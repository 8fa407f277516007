pub mod check;
pub mod eval;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Voxgate - keyword-filter bypass demo (text vs. transcribed audio)
#[derive(Debug, Parser)]
#[command(name = "voxgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 8642)]
        port: u16,
    },

    /// Classify a string with the configured filter and print the decision
    Check {
        /// Text to classify
        text: String,
    },

    /// Run an evaluation suite against a running server
    Eval {
        /// Path to a TOML case file
        cases: PathBuf,

        /// Base URL of the server under test
        #[arg(long, default_value = "http://127.0.0.1:8642")]
        url: String,
    },
}
