//! Process-wide configuration, resolved once at startup.
//!
//! Precedence is defaults, then environment, then command-line flags.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// How a failed tool call is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorEncoding {
    /// `{"error": "<message>"}`.
    #[default]
    ErrorField,
    /// `{"result": "Error: <message>"}`, for callers that only read `result`.
    ResultText,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub fetch_timeout: Duration,
    /// Base for relative `save_file` paths. `None` means the working directory.
    pub save_dir: Option<PathBuf>,
    pub user_agent: String,
    pub error_encoding: ErrorEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            save_dir: None,
            user_agent: default_user_agent(),
            error_encoding: ErrorEncoding::default(),
        }
    }
}

pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Command-line and environment overrides.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Timeout for fetch_url requests, in seconds
    #[arg(
        long,
        global = true,
        env = "TOOLBOX_FETCH_TIMEOUT_SECS",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS
    )]
    pub fetch_timeout_secs: u64,

    /// Directory that relative save_file paths are resolved against
    #[arg(long, global = true, env = "TOOLBOX_SAVE_DIR")]
    pub save_dir: Option<PathBuf>,

    /// User-Agent header sent by fetch_url
    #[arg(long, global = true, env = "TOOLBOX_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Report tool failures as `result` text instead of `error`
    ///
    /// The environment value accepts `1`/`0`, `yes`/`no`, `on`/`off` and `true`/`false`.
    #[arg(
        long,
        global = true,
        env = "TOOLBOX_ERRORS_AS_RESULTS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub errors_as_results: bool,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<Config> {
        if self.fetch_timeout_secs == 0 {
            bail!("fetch timeout must be at least one second");
        }
        Ok(Config {
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            save_dir: self.save_dir,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            error_encoding: if self.errors_as_results {
                ErrorEncoding::ResultText
            } else {
                ErrorEncoding::ErrorField
            },
        })
    }
}
