//! Error Catalog for Emote Collector
//!
//! Every failure the service can surface to a user is listed here as an
//! [`ErrorCode`]. Each code carries:
//! - A stable code (EC-E001 through EC-E399)
//! - A localization template key and its English fallback template
//! - The named parameters the template may interpolate
//! - Its cross-cutting classifications (timeout, invalid argument,
//!   user attribution, remedy)
//!
//! # Error Code Ranges
//!
//! | Range      | Category  | Description                                   |
//! |------------|-----------|-----------------------------------------------|
//! | E001-E099  | General   | Generic service failures                      |
//! | E100-E199  | Emote     | Failures while creating or modifying an emote |
//! | E200-E299  | Argument  | Bad command arguments                         |
//! | E300-E399  | Platform  | Chat platform failures not caused by the user |
//!
//! # Example
//!
//! ```rust
//! use emote_common::errors::catalog::ErrorCode;
//!
//! let code = ErrorCode::EmoteNotFound;
//! println!("{} ({})", code.code_string(), code.template_key());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag enumeration covering every service error variant.
///
/// Each variant maps to a unique error code in the EC-Exxx format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // =========================================================================
    // General Errors (E001-E099)
    // =========================================================================
    /// The invoking user is blacklisted
    Blacklisted,
    /// An image URL answered with a non-success status
    HttpFailure,
    /// The payload is not a GIF, PNG, JPG, or WEBP
    InvalidImage,
    /// Retrieving the image exceeded its deadline
    FetchTimeout,
    /// Resizing the image exceeded its deadline
    ResizeTimeout,
    /// Every storage slot of the requested kind is occupied
    NoStorageSlotsAvailable,

    // =========================================================================
    // Emote Errors (E100-E199)
    // =========================================================================
    /// An emote with that name is already registered
    EmoteAlreadyExists,
    /// No emote with that name is registered
    EmoteNotFound,
    /// The actor does not own the emote
    PermissionDenied,
    /// The supplied description exceeds the limit
    DescriptionTooLong,

    // =========================================================================
    // Argument Errors (E200-E299)
    // =========================================================================
    /// An NSFW emote was used in an SFW channel
    NsfwInSafeChannel,

    // =========================================================================
    // Platform Errors (E300-E399)
    // =========================================================================
    /// The chat platform's cache or backend is inconsistent
    UpstreamPlatformUnavailable,
}

impl ErrorCode {
    /// Returns the numeric error code (without prefix).
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            // General (001-099)
            Self::Blacklisted => 1,
            Self::HttpFailure => 2,
            Self::InvalidImage => 3,
            Self::FetchTimeout => 4,
            Self::ResizeTimeout => 5,
            Self::NoStorageSlotsAvailable => 6,

            // Emote (100-199)
            Self::EmoteAlreadyExists => 100,
            Self::EmoteNotFound => 101,
            Self::PermissionDenied => 102,
            Self::DescriptionTooLong => 103,

            // Argument (200-299)
            Self::NsfwInSafeChannel => 200,

            // Platform (300-399)
            Self::UpstreamPlatformUnavailable => 300,
        }
    }

    /// Returns the formatted error code string (e.g., "EC-E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("EC-E{:03}", self.code_number())
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            100..=199 => ErrorCategory::Emote,
            200..=299 => ErrorCategory::Argument,
            300..=399 => ErrorCategory::Platform,
            _ => ErrorCategory::General,
        }
    }

    /// Returns the localization key of this code's message template.
    #[must_use]
    pub const fn template_key(&self) -> &'static str {
        match self {
            Self::Blacklisted => "errors.blacklisted",
            Self::HttpFailure => "errors.http_failure",
            Self::InvalidImage => "errors.invalid_image",
            Self::FetchTimeout => "errors.fetch_timeout",
            Self::ResizeTimeout => "errors.resize_timeout",
            Self::NoStorageSlotsAvailable => "errors.no_storage_slots_available",
            Self::EmoteAlreadyExists => "errors.emote_already_exists",
            Self::EmoteNotFound => "errors.emote_not_found",
            Self::PermissionDenied => "errors.permission_denied",
            Self::DescriptionTooLong => "errors.description_too_long",
            Self::NsfwInSafeChannel => "errors.nsfw_in_safe_channel",
            Self::UpstreamPlatformUnavailable => "errors.upstream_platform_unavailable",
        }
    }

    /// Looks up the code owning a template key.
    #[must_use]
    pub fn from_template_key(key: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|code| code.template_key() == key)
    }

    /// Returns the English message template.
    #[must_use]
    pub const fn fallback_template(&self) -> &'static str {
        match self {
            Self::Blacklisted => {
                "Sorry, you have been blacklisted for “{reason}”. \
                 To appeal, please join the support server by running __{prefix}support__."
            }
            Self::HttpFailure => "URL error: server returned error code {status}",
            Self::InvalidImage => "The image supplied was not a valid GIF, PNG, JPG, or WEBP file.",
            Self::FetchTimeout => "Error: Retrieving the image took too long.",
            Self::ResizeTimeout => "Error: Resizing the image took too long.",
            Self::NoStorageSlotsAvailable => "No more room to store emotes.",
            Self::EmoteAlreadyExists => "An emote called “{name}” already exists in my database.",
            Self::EmoteNotFound => "An emote called “{name}” does not exist in my database.",
            Self::PermissionDenied => "You're not authorized to modify “{name}”.",
            Self::DescriptionTooLong => "That description is too long. The limit is {max_length}.",
            Self::NsfwInSafeChannel => "“{name}” is NSFW, but this channel is SFW.",
            Self::UpstreamPlatformUnavailable => {
                "Discord seems to be having issues right now, please try again later."
            }
        }
    }

    /// Returns the parameter names a template for this code may use.
    #[must_use]
    pub const fn params(&self) -> &'static [&'static str] {
        match self {
            Self::Blacklisted => &["prefix", "reason"],
            Self::HttpFailure => &["status"],
            Self::EmoteAlreadyExists
            | Self::EmoteNotFound
            | Self::PermissionDenied
            | Self::NsfwInSafeChannel => &["name"],
            Self::DescriptionTooLong => &["name", "actual_length", "max_length", "limit"],
            Self::InvalidImage
            | Self::FetchTimeout
            | Self::ResizeTimeout
            | Self::NoStorageSlotsAvailable
            | Self::UpstreamPlatformUnavailable => &[],
        }
    }

    /// Whether the failed operation ran out of time.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::FetchTimeout | Self::ResizeTimeout)
    }

    /// Whether the failure is a bad command argument.
    ///
    /// New bad-input codes must be added here explicitly.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::NsfwInSafeChannel)
    }

    /// Whether the invoking user caused the failure.
    #[must_use]
    pub const fn is_user_attributable(&self) -> bool {
        match self {
            Self::Blacklisted
            | Self::HttpFailure
            | Self::InvalidImage
            | Self::EmoteAlreadyExists
            | Self::EmoteNotFound
            | Self::PermissionDenied
            | Self::DescriptionTooLong
            | Self::NsfwInSafeChannel => true,
            Self::FetchTimeout
            | Self::ResizeTimeout
            | Self::NoStorageSlotsAvailable
            | Self::UpstreamPlatformUnavailable => false,
        }
    }

    /// Returns what the user should do next.
    #[must_use]
    pub const fn remedy(&self) -> Remedy {
        match self {
            Self::FetchTimeout | Self::ResizeTimeout | Self::UpstreamPlatformUnavailable => {
                Remedy::RetryLater
            }
            Self::HttpFailure
            | Self::InvalidImage
            | Self::EmoteAlreadyExists
            | Self::EmoteNotFound
            | Self::PermissionDenied
            | Self::DescriptionTooLong
            | Self::NsfwInSafeChannel => Remedy::CorrectInput,
            Self::Blacklisted => Remedy::Appeal,
            Self::NoStorageSlotsAvailable => Remedy::ContactOperator,
        }
    }

    /// Returns all error codes.
    #[must_use]
    pub const fn all() -> &'static [ErrorCode] {
        &[
            // General
            Self::Blacklisted,
            Self::HttpFailure,
            Self::InvalidImage,
            Self::FetchTimeout,
            Self::ResizeTimeout,
            Self::NoStorageSlotsAvailable,
            // Emote
            Self::EmoteAlreadyExists,
            Self::EmoteNotFound,
            Self::PermissionDenied,
            Self::DescriptionTooLong,
            // Argument
            Self::NsfwInSafeChannel,
            // Platform
            Self::UpstreamPlatformUnavailable,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.template_key())
    }
}

/// Error category for grouping related errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Generic service failures (E001-E099)
    General,
    /// Emote creation and modification failures (E100-E199)
    Emote,
    /// Bad command arguments (E200-E299)
    Argument,
    /// Chat platform failures (E300-E399)
    Platform,
}

impl ErrorCategory {
    /// Returns a human-readable name for the category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Emote => "Emote",
            Self::Argument => "Argument",
            Self::Platform => "Platform",
        }
    }

    /// Returns a short description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::General => "Blacklisting, image retrieval, and storage capacity issues",
            Self::Emote => "Problems creating, finding, or modifying a specific emote",
            Self::Argument => "Command arguments that are not acceptable here",
            Self::Platform => "Chat platform issues outside the user's control",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Suggested follow-up shown alongside an error.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Remedy {
    /// Nothing was wrong with the request; trying again later may work.
    RetryLater,
    /// The request itself must change.
    CorrectInput,
    /// The user can appeal through the support server.
    Appeal,
    /// Operators have to act (e.g. provision more storage).
    ContactOperator,
}
