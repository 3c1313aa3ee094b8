//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use std::any::Any;

use hookkit::config::ConfigError;
use hookkit::error::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - bind failure, signal setup failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a hint for common configuration errors, if one applies.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::FileRead { .. } | ConfigError::TomlParse(_) => {
            Some("Run 'hookkit init' to generate a configuration template.")
        }
        ConfigError::InvalidUrl { .. } => {
            Some("The upstream URL must be absolute, e.g. 'https://hooks.example.com/api/'.")
        }
        ConfigError::InvalidRuntimeMode(_) => {
            Some("server.runtime_mode must be 'standard' or 'debug'.")
        }
        _ => None,
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    install_panic_hook();
}

/// Whether a panic payload is a raised [`Error`] on its way to the recovery layer.
pub fn is_raised_error(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Error>()
}

/// Replaces the default panic hook.
///
/// Raised errors are already logged by `raise` and again by the recovery
/// layer, so the hook stays silent for them; every other panic goes to the
/// tracing stream instead of raw stderr.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        if !is_raised_error(info.payload()) {
            tracing::error!("{info}");
        }
    }));
}
