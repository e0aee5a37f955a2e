//! Tracing subscriber setup.
//!
//! Binaries call [`init_logging`] once at startup (usually with values from
//! [`crate::config::Settings`]); tests call [`init_test_logging`], which is
//! safe to call from every test.
//!
//! ```ignore
//! let (settings, problems) = Settings::from_env();
//! init_logging(&settings.log_level.value, settings.log_json.value);
//! for problem in problems {
//!     tracing::warn!(%problem, "Ignoring invalid setting");
//! }
//! ```

use std::sync::Once;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

static LOGGING_INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when set. Subsequent calls are no-ops.
pub fn init_logging(level: &str, json: bool) {
    LOGGING_INIT.call_once(|| {
        let filter = build_filter(level);

        let json_layer = json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
        });
        let text_layer = (!json).then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .compact()
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(text_layer);

        // Another subscriber may already be installed by the host process.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Install a human-readable subscriber that writes through the test harness.
///
/// The level comes from `EC_TEST_LOG_LEVEL` (default: `debug`).
pub fn init_test_logging() {
    LOGGING_INIT.call_once(|| {
        let level = std::env::var("EC_TEST_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());

        let subscriber = tracing_subscriber::registry()
            .with(build_filter(&level))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true)
                    .compact(),
            );

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("emote_common={level}")))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
