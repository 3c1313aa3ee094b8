//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Server configuration section
    #[serde(default)]
    pub server: ServerSection,

    /// Upstream relay configuration section
    #[serde(default)]
    pub upstream: UpstreamSection,
}

/// Server configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Socket address to listen on
    pub listen: Option<String>,

    /// Grace period in seconds
    pub grace_period: Option<u64>,

    /// Error rendering mode: "standard" or "debug"
    pub runtime_mode: Option<String>,
}

/// Upstream relay configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamSection {
    /// Base URL of the upstream endpoint
    pub url: Option<String>,

    /// `User-Agent` header value (empty string omits the header)
    pub user_agent: Option<String>,

    /// `Accept` header value (empty string omits the header)
    pub accept: Option<String>,

    /// `Content-Type` header value (empty string omits the header)
    pub content_type: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# hookkit Configuration File

[server]
# Socket address to listen on (default: 127.0.0.1:8080)
listen = "127.0.0.1:8080"

# Seconds between cancellation and process exit (default: 2, max: 300)
grace_period = 2

# Error rendering in logs: "standard" or "debug" (default: standard)
# The RUNTIME_MODE environment variable takes precedence over this value.
# runtime_mode = "standard"

[upstream]
# Base URL that /relay/* requests are forwarded to.
# Without it, /relay/* answers 503.
# url = "https://hooks.example.com/api/"

# Header values; set to "" to omit a header entirely
# user_agent = "hookkit/0.1.0"
# accept = "application/json"
# content_type = "application/json"

# Request timeout in seconds (default: 30)
# timeout = 30
"#
    .to_string()
}
