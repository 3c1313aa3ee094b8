//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::client::{Client, ReqwestClient};
use crate::error::{Error, RenderMode};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Address the relay server binds to
    pub listen: SocketAddr,

    /// Delay between cancellation and process exit
    pub grace_period: Duration,

    /// How much detail error renderings carry in logs
    pub runtime_mode: RenderMode,

    /// Upstream relay target; `None` disables forwarding
    pub upstream: Option<UpstreamConfig>,

    /// Verbose logging enabled
    pub verbose: bool,

    /// Non-fatal problems found while resolving, to be logged once tracing is up
    pub warnings: Vec<String>,
}

/// Settings for the upstream request executor.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL every relayed path is resolved against
    pub url: Url,

    /// `User-Agent` value; empty means the header is omitted
    pub user_agent: String,

    /// `Accept` value; empty means the header is omitted
    pub accept: String,

    /// `Content-Type` value; empty means the header is omitted
    pub content_type: String,

    /// Per-request timeout enforced by the transport
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Builds the executor described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns a 500 error if the transport cannot be initialized.
    pub fn client(&self) -> Result<Client, Error> {
        let transport = ReqwestClient::with_timeout(self.timeout).map_err(|e| {
            Error::with_cause("cannot initialize upstream transport", 500, e)
        })?;

        Ok(Client::with_transport(transport, self.url.as_str())?
            .with_user_agent(self.user_agent.as_str())
            .with_accept(self.accept.as_str())
            .with_content_type(self.content_type.as_str()))
    }
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upstream = self
            .upstream
            .as_ref()
            .map_or_else(|| "none".to_string(), |u| u.url.to_string());

        write!(
            f,
            "Config {{ listen: {}, grace_period: {}s, runtime_mode: {}, upstream: {} }}",
            self.listen,
            self.grace_period.as_secs(),
            self.runtime_mode,
            upstream,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The listen address is not a socket address
    /// - The grace period is zero or above the allowed maximum
    /// - The TOML runtime mode is neither `standard` nor `debug`
    /// - The upstream URL cannot serve as a base URL
    /// - The upstream timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let listen = Self::resolve_listen(cli, toml)?;
        let grace_period = Self::resolve_grace_period(cli, toml)?;
        let mut warnings = Vec::new();
        let runtime_mode = Self::resolve_runtime_mode(cli, toml, &mut warnings)?;
        let upstream = Self::resolve_upstream(cli, toml)?;

        Ok(Self {
            listen,
            grace_period,
            runtime_mode,
            upstream,
            verbose: cli.verbose,
            warnings,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_listen(cli: &Cli, toml: Option<&TomlConfig>) -> Result<SocketAddr, ConfigError> {
        let Some(raw) = cli
            .listen
            .as_deref()
            .or_else(|| toml.and_then(|t| t.server.listen.as_deref()))
        else {
            return Ok(defaults::listen());
        };

        raw.trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidListen {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    fn resolve_grace_period(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .grace_period
            .or_else(|| toml.and_then(|t| t.server.grace_period))
            .unwrap_or(defaults::GRACE_PERIOD_SECS);

        parse_seconds(field::GRACE_PERIOD, seconds, defaults::MAX_GRACE_PERIOD_SECS)
    }

    /// The CLI value may come from the shared `RUNTIME_MODE` variable, which
    /// other tools set to their own values, so an unknown value there falls back
    /// to [`RenderMode::Standard`] with a warning. The TOML value is strict.
    fn resolve_runtime_mode(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        warnings: &mut Vec<String>,
    ) -> Result<RenderMode, ConfigError> {
        if let Some(raw) = cli.runtime_mode.as_deref() {
            return Ok(raw.parse::<RenderMode>().unwrap_or_else(|reason| {
                warnings.push(format!(
                    "Ignoring runtime mode from --runtime-mode/RUNTIME_MODE ({reason}), \
                     using {}",
                    RenderMode::Standard
                ));
                RenderMode::Standard
            }));
        }

        toml.and_then(|t| t.server.runtime_mode.as_deref())
            .map_or(Ok(RenderMode::default()), |raw| {
                raw.parse::<RenderMode>()
                    .map_err(ConfigError::InvalidRuntimeMode)
            })
    }

    fn resolve_upstream(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<UpstreamConfig>, ConfigError> {
        let section = toml.map(|t| &t.upstream);

        let Some(raw_url) = cli
            .upstream
            .as_deref()
            .or_else(|| section.and_then(|s| s.url.as_deref()))
        else {
            return Ok(None);
        };

        // Same validation the executor applies at construction
        let url = Client::validate_base_url(raw_url).map_err(|e| ConfigError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.detailed(),
        })?;

        let user_agent = cli
            .user_agent
            .as_deref()
            .or_else(|| section.and_then(|s| s.user_agent.as_deref()))
            .unwrap_or(defaults::USER_AGENT)
            .to_string();

        let accept = cli
            .accept
            .as_deref()
            .or_else(|| section.and_then(|s| s.accept.as_deref()))
            .unwrap_or(defaults::ACCEPT)
            .to_string();

        let content_type = cli
            .content_type
            .as_deref()
            .or_else(|| section.and_then(|s| s.content_type.as_deref()))
            .unwrap_or(defaults::CONTENT_TYPE)
            .to_string();

        let timeout_secs = cli
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::UPSTREAM_TIMEOUT_SECS);
        let timeout = parse_seconds(field::TIMEOUT, timeout_secs, u64::MAX)?;

        Ok(Some(UpstreamConfig {
            url,
            user_agent,
            accept,
            content_type,
            timeout,
        }))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn parse_seconds(field: &'static str, seconds: u64, max: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    if seconds > max {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: format!("must be at most {max}s, got {seconds}s"),
        });
    }
    Ok(Duration::from_secs(seconds))
}
