//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// hookkit: JSON webhook relay
///
/// Serves a small JSON API with panic recovery and graceful shutdown,
/// optionally forwarding `/relay/*` requests to an upstream webhook endpoint.
#[derive(Debug, Parser)]
#[command(name = "hookkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Socket address to listen on (e.g. 127.0.0.1:8080)
    #[arg(long)]
    pub listen: Option<String>,

    /// Seconds to wait between cancellation and process exit
    #[arg(long = "grace-period")]
    pub grace_period: Option<u64>,

    /// Error rendering in logs: "standard" or "debug"
    #[arg(long = "runtime-mode", env = "RUNTIME_MODE")]
    pub runtime_mode: Option<String>,

    /// Base URL requests under /relay/ are forwarded to
    #[arg(long)]
    pub upstream: Option<String>,

    /// User-Agent for upstream requests (empty to omit)
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Accept header for upstream requests (empty to omit)
    #[arg(long)]
    pub accept: Option<String>,

    /// Content-Type for upstream requests with a body (empty to omit)
    #[arg(long = "content-type")]
    pub content_type: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for hookkit
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "hookkit.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
