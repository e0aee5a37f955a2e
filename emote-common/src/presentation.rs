//! Presentation boundary for service errors.
//!
//! Command handlers propagate [`ServiceError`] values untouched; the
//! response layer hands each one to [`present`] exactly once. It renders
//! the message in the caller's locale, logs the failure, and returns an
//! [`ErrorReport`] for the reply.

use crate::errors::{ErrorCategory, Remedy, ServiceError};
use crate::locale::LocaleLookup;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A rendered error, ready to be sent to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ErrorReport {
    /// Error code string (e.g., "EC-E101")
    pub code: String,
    /// Localization key the message was rendered from
    pub key: String,
    pub category: ErrorCategory,
    /// Localized user-facing message
    pub message: String,
    /// Whether the user caused the failure
    pub user_attributable: bool,
    pub remedy: Remedy,
}

impl ErrorReport {
    /// Formats the report as a single line.
    #[must_use]
    pub fn format_brief(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Render and log `err`, consuming it.
///
/// Failures the user did not cause are logged at `warn`; everything else
/// is routine feedback and logged at `debug`.
pub fn present(err: ServiceError, locale: &dyn LocaleLookup) -> ErrorReport {
    let code = err.code();
    let report = ErrorReport {
        code: code.code_string(),
        key: code.template_key().to_string(),
        category: code.category(),
        message: err.render(locale),
        user_attributable: code.is_user_attributable(),
        remedy: code.remedy(),
    };

    if report.user_attributable {
        debug!(
            code = %report.code,
            key = %report.key,
            locale = locale.tag(),
            error = ?err,
            "Command failed"
        );
    } else {
        warn!(
            code = %report.code,
            key = %report.key,
            locale = locale.tag(),
            remedy = ?report.remedy,
            error = ?err,
            "Command failed for reasons outside the user's control"
        );
    }

    report
}
