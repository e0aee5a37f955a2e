//! Configuration for Emote Collector's error reporting.
//!
//! - Environment variable parsing with type safety
//! - Source tracking for debugging

pub mod env;
pub mod source;

pub use env::{EnvError, EnvParser, LOG_LEVELS, Settings};
pub use source::{ConfigSource, Sourced};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
