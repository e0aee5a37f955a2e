//! `EC_*` environment variables.
//!
//! [`EnvParser`] reads one variable at a time and remembers every value it
//! had to reject, so a misconfigured deployment reports all of its problems
//! at startup. [`Settings`] is the error-reporting configuration built on it.

use super::source::Sourced;
use crate::locale::{FALLBACK_LOCALE, LocaleError, Locales};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Accepted `EC_LOG_LEVEL` values.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// A rejected environment value. The variable falls back to its default.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{var}={value:?} is not a valid {expected}")]
    InvalidValue {
        var: String,
        expected: &'static str,
        value: String,
    },

    #[error("{var} points at {}, which is not a directory", .path.display())]
    NotADirectory { var: String, path: PathBuf },

    #[error("{var}={value:?} is not a log level (expected one of {})", LOG_LEVELS.join(", "))]
    InvalidLogLevel { var: String, value: String },
}

/// Reads prefixed environment variables, collecting rejected values.
#[derive(Debug, Default)]
pub struct EnvParser {
    errors: Vec<EnvError>,
}

impl EnvParser {
    pub const PREFIX: &'static str = "EC_";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// Read `EC_<name>` through `parse`.
    ///
    /// Unset (or non-UTF-8) variables yield `default` sourced from the
    /// defaults. A rejected value yields `default` sourced from the
    /// environment, and the error is kept.
    fn read<T>(
        &mut self,
        name: &str,
        default: T,
        parse: impl FnOnce(&str, String) -> Result<T, EnvError>,
    ) -> Sourced<T> {
        let var = format!("{}{name}", Self::PREFIX);
        let Ok(raw) = env::var(&var) else {
            return Sourced::default_value(default);
        };
        match parse(&var, raw) {
            Ok(value) => Sourced::from_env(value, var),
            Err(err) => {
                self.errors.push(err);
                Sourced::from_env(default, var)
            }
        }
    }

    pub fn get_string(&mut self, name: &str, default: &str) -> Sourced<String> {
        self.read(name, default.to_string(), |_, raw| Ok(raw))
    }

    /// `1`/`true`/`yes`/`on` or `0`/`false`/`no`/`off`/empty, any case.
    pub fn get_bool(&mut self, name: &str, default: bool) -> Sourced<bool> {
        self.read(name, default, parse_bool)
    }

    /// A directory that must exist. Empty means none.
    pub fn get_optional_dir(&mut self, name: &str) -> Sourced<Option<PathBuf>> {
        self.read(name, None, |var, raw| {
            if raw.is_empty() {
                return Ok(None);
            }
            let path = PathBuf::from(raw);
            if path.is_dir() {
                Ok(Some(path))
            } else {
                Err(EnvError::NotADirectory {
                    var: var.to_string(),
                    path,
                })
            }
        })
    }

    /// One of [`LOG_LEVELS`], any case; stored lowercase.
    pub fn get_log_level(&mut self, name: &str, default: &str) -> Sourced<String> {
        self.read(name, default.to_string(), |var, raw| {
            LOG_LEVELS
                .iter()
                .find(|level| level.eq_ignore_ascii_case(raw.trim()))
                .map(|level| (*level).to_string())
                .ok_or_else(|| EnvError::InvalidLogLevel {
                    var: var.to_string(),
                    value: raw,
                })
        })
    }
}

fn parse_bool(var: &str, raw: String) -> Result<bool, EnvError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(EnvError::InvalidValue {
            var: var.to_string(),
            expected: "boolean (1/0, true/false, yes/no, on/off)",
            value: raw,
        }),
    }
}

/// Settings for error rendering and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Default locale tag for rendering (`EC_LOCALE`).
    pub locale: Sourced<String>,
    /// Directory of `*.toml` locale catalogs (`EC_LOCALE_DIR`).
    pub locale_dir: Sourced<Option<PathBuf>>,
    /// Log level filter (`EC_LOG_LEVEL`).
    pub log_level: Sourced<String>,
    /// Emit JSON log lines (`EC_LOG_JSON`).
    pub log_json: Sourced<bool>,
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// Invalid values fall back to their defaults; the problems are
    /// returned alongside so the caller can report all of them.
    pub fn from_env() -> (Self, Vec<EnvError>) {
        let mut parser = EnvParser::new();
        let settings = Self {
            locale: parser.get_string("LOCALE", FALLBACK_LOCALE),
            locale_dir: parser.get_optional_dir("LOCALE_DIR"),
            log_level: parser.get_log_level("LOG_LEVEL", "info"),
            log_json: parser.get_bool("LOG_JSON", false),
        };
        (settings, parser.take_errors())
    }

    /// Load the configured catalogs, or an empty registry when no
    /// directory is configured.
    pub fn load_locales(&self) -> Result<Locales, LocaleError> {
        match &self.locale_dir.value {
            Some(dir) => Locales::load_dir(dir),
            None => Ok(Locales::new()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: Sourced::default_value(FALLBACK_LOCALE.to_string()),
            locale_dir: Sourced::default_value(None),
            log_level: Sourced::default_value("info".to_string()),
            log_json: Sourced::default_value(false),
        }
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = self
            .locale_dir
            .value
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |d| d.display().to_string());
        write!(
            f,
            "locale={} ({}), locale_dir={} ({}), log_level={} ({}), log_json={} ({})",
            self.locale.value,
            self.locale.source,
            dir,
            self.locale_dir.source,
            self.log_level.value,
            self.log_level.source,
            self.log_json.value,
            self.log_json.source,
        )
    }
}
