use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::utils::parse_flag;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ACCESS_CONTROL: bool = false;
pub const DEFAULT_DEBUG_LOG: bool = true;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Endpoint URL from `SCRIPT_URL`. Blank values count as unset.
pub fn get_script_url() -> Option<String> {
    env::var("SCRIPT_URL")
        .ok()
        .map(|raw| sanitize_script_url(&raw))
        .filter(|url| !url.is_empty())
}

pub fn get_access_control() -> bool {
    parse_flag(env::var("ACCESS_CONTROL").ok().as_deref(), DEFAULT_ACCESS_CONTROL)
}

pub fn get_debug_log() -> bool {
    parse_flag(env::var("DEBUG_LOG").ok().as_deref(), DEFAULT_DEBUG_LOG)
}

/// Optional request timeout. Unset, blank and `0` all mean "no timeout".
pub fn get_request_timeout() -> Result<Option<Duration>, ConfigError> {
    let raw = match env::var("REQUEST_TIMEOUT_SECS") {
        Ok(raw) => raw,
        Err(_) => return Ok(None),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
    if secs == 0 {
        Ok(None)
    } else {
        Ok(Some(Duration::from_secs(secs)))
    }
}

pub fn sanitize_script_url(raw: &str) -> String {
    raw.trim().to_string()
}

/// Everything the sync client needs to know about its environment.
///
/// Built explicitly and handed to [`crate::FormSyncClient::new`]. A missing
/// endpoint is representable (empty `script_url`) and reported through
/// [`AppConfig::validate`] instead of failing construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub script_url: String,
    pub access_control: bool,
    pub debug_log: bool,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn new(script_url: impl Into<String>) -> Self {
        Self {
            script_url: sanitize_script_url(&script_url.into()),
            access_control: DEFAULT_ACCESS_CONTROL,
            debug_log: DEFAULT_DEBUG_LOG,
            request_timeout: None,
        }
    }

    /// Config with no endpoint. Every request made with it fails at send time.
    pub fn unconfigured() -> Self {
        Self::new("")
    }

    pub fn with_access_control(mut self, enabled: bool) -> Self {
        self.access_control = enabled;
        self
    }

    pub fn with_debug_log(mut self, enabled: bool) -> Self {
        self.debug_log = enabled;
        self
    }

    /// Apply command-line flags on top of the environment. `--access-control`
    /// can only turn access control on; `--quiet` can only turn the debug
    /// log off.
    pub fn with_cli_overrides(self, access_control: bool, quiet: bool) -> Self {
        let access_control = self.access_control || access_control;
        let debug_log = self.debug_log && !quiet;
        self.with_access_control(access_control).with_debug_log(debug_log)
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read the process environment (call [`load_env_file`] first to pick up
    /// a `.env`). Only malformed values are errors; a missing `SCRIPT_URL`
    /// yields an unconfigured value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let request_timeout = get_request_timeout()?;
        Ok(Self {
            script_url: get_script_url().unwrap_or_default(),
            access_control: get_access_control(),
            debug_log: get_debug_log(),
            request_timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.script_url.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::MissingScriptUrl)
        }
    }
}
