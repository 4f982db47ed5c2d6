//! CLI command definitions and dispatch for the `vocalis` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod assets;
pub mod invoke;
pub mod request;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Declare, serve and exercise voice skills.
#[derive(Parser)]
#[command(name = "vocalis", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to vocalis.toml.
    #[arg(long, global = true, env = "VOCALIS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the demo skill as an HTTP webhook.
    Serve {
        /// Port to listen on (falls back to $PORT, then the config file).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to.
        #[arg(long)]
        host: Option<String>,

        /// Also export spans through OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Print or save the demo skill's speech assets.
    Assets {
        /// Write the assets into this directory instead of printing them.
        #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = "speechAssets")]
        out: Option<PathBuf>,
    },

    /// Print a sample request document.
    Request {
        #[command(subcommand)]
        kind: RequestKind,
    },

    /// Dispatch a request file against the demo skill and print the response.
    Invoke {
        /// Request JSON file (`-` reads stdin).
        file: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RequestKind {
    /// A LaunchRequest on a new session.
    Launch {
        /// Application id of the caller.
        #[arg(long)]
        app_id: Option<String>,
    },

    /// An IntentRequest.
    Intent {
        /// Intent name as the platform sends it (e.g. AMAZON.StopIntent).
        name: String,

        /// Slot value, repeatable.
        #[arg(long = "slot", value_name = "NAME=VALUE", value_parser = parse_key_value)]
        slots: Vec<(String, String)>,

        /// Session attribute (JSON value, or a plain string), repeatable.
        #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        attributes: Vec<(String, String)>,

        /// Value of previousIntent.
        #[arg(long)]
        previous: Option<String>,

        /// Mark the session as new.
        #[arg(long)]
        new_session: bool,

        /// Application id of the caller.
        #[arg(long)]
        app_id: Option<String>,
    },

    /// A SessionEndedRequest.
    End {
        /// Reason the session ended.
        #[arg(long, default_value = "USER_INITIATED")]
        reason: String,

        /// Application id of the caller.
        #[arg(long)]
        app_id: Option<String>,
    },
}

/// Parse `key=value`; the value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}
