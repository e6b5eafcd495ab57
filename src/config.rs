//! Runtime configuration, read once at startup.
//!
//! Every setting comes from an environment variable with a local-development
//! default. `from_lookup` takes the lookup as a closure so tests can supply
//! values without touching the process environment.

use crate::tui::Route;
use crate::CardioError;

/// Base URL of the statistics backend.
pub const API_BASE_ENV: &str = "CARDIODASH_API_BASE";
/// `auto`, `file` or `stdout`.
pub const LOG_MODE_ENV: &str = "CARDIODASH_LOG_MODE";
/// Log file used when logging to a file.
pub const LOG_FILE_ENV: &str = "CARDIODASH_LOG_FILE";
/// Route path to open first.
pub const START_ROUTE_ENV: &str = "CARDIODASH_START_ROUTE";

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_LOG_FILE: &str = "cardiodash.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::Auto => interactive,
            Self::File => true,
            Self::Stdout => false,
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base: String,
    pub log_mode: LogMode,
    pub log_file: String,
    pub start_route: Route,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_mode: LogMode::Auto,
            log_file: DEFAULT_LOG_FILE.to_string(),
            start_route: Route::Home,
        }
    }
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `CardioError::Config` for an unusable value.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// # Errors
    /// Returns `CardioError::Config` for an unusable value.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_ENV) {
            let base = base.trim().trim_end_matches('/').to_string();
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(CardioError::Config(format!(
                    "{API_BASE_ENV} must be an http(s) URL, got {base:?}"
                )));
            }
            config.api_base = base;
        }

        if let Some(mode) = lookup(LOG_MODE_ENV) {
            config.log_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "auto" | "" => LogMode::Auto,
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                other => {
                    return Err(CardioError::Config(format!(
                        "{LOG_MODE_ENV} must be auto, file or stdout, got {other:?}"
                    )))
                }
            };
        }

        if let Some(file) = lookup(LOG_FILE_ENV).filter(|f| !f.trim().is_empty()) {
            config.log_file = file;
        }

        if let Some(path) = lookup(START_ROUTE_ENV) {
            config.start_route = Route::from_path(&path).ok_or_else(|| {
                CardioError::Config(format!("{START_ROUTE_ENV}: unknown route {path:?}"))
            })?;
        }

        Ok(config)
    }
}
