//! The service error taxonomy.
//!
//! [`ServiceError`] is the single error type every subsystem (command
//! handlers, the image fetcher and resizer, the slot allocator, permission
//! checks) raises when an emote operation fails. A value is built at the
//! point of failure, passed up unchanged, and rendered once at the
//! presentation boundary (see [`crate::presentation`]).
//!
//! Messages are not formatted at construction. Each variant exposes a
//! template key plus named parameters, and [`ServiceError::render`]
//! resolves the key through a [`LocaleLookup`], falling back to English.

use super::catalog::{ErrorCategory, ErrorCode, Remedy};
use crate::locale::{English, LocaleLookup, TemplateArgs, substitute};
use std::fmt;
use tracing::warn;

/// Result alias for operations that fail with a [`ServiceError`].
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Reference to a registered emote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmoteRef {
    /// Platform snowflake of the emote.
    pub id: u64,
    pub name: String,
    pub animated: bool,
}

impl EmoteRef {
    pub fn new(id: u64, name: impl Into<String>, animated: bool) -> Self {
        Self {
            id,
            name: name.into(),
            animated,
        }
    }
}

/// Every failure the emote service reports to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is blacklisted. `prefix` is the command prefix used to
    /// point them at the support command.
    Blacklisted { prefix: String, reason: String },

    /// An image URL answered with a non-success status.
    HttpFailure { status: i64 },

    /// The payload is not a GIF, PNG, JPG, or WEBP.
    InvalidImage,

    /// Retrieving the image exceeded its deadline.
    FetchTimeout,

    /// Resizing the image exceeded its deadline.
    ResizeTimeout,

    /// An emote with this name is already registered.
    EmoteAlreadyExists { emote: EmoteRef, name: String },

    /// No emote with this name is registered.
    EmoteNotFound { name: String },

    /// The actor does not own the emote.
    PermissionDenied { name: String },

    /// A description is longer than allowed.
    DescriptionTooLong {
        name: String,
        actual_length: usize,
        max_length: usize,
    },

    /// Every storage slot of the requested (static/animated) kind is taken.
    NoStorageSlotsAvailable,

    /// The chat platform's cache or backend is inconsistent.
    UpstreamPlatformUnavailable,

    /// An NSFW emote was requested in an SFW channel.
    NsfwInSafeChannel { name: String },
}

impl ServiceError {
    // --- Constructors ---

    pub fn blacklisted(prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Blacklisted {
            prefix: prefix.into(),
            reason: reason.into(),
        }
    }

    /// Any status is accepted, including non-HTTP and negative codes.
    pub fn http_failure(status: i64) -> Self {
        Self::HttpFailure { status }
    }

    pub fn invalid_image() -> Self {
        Self::InvalidImage
    }

    pub fn fetch_timeout() -> Self {
        Self::FetchTimeout
    }

    pub fn resize_timeout() -> Self {
        Self::ResizeTimeout
    }

    pub fn no_storage_slots_available() -> Self {
        Self::NoStorageSlotsAvailable
    }

    pub fn upstream_platform_unavailable() -> Self {
        Self::UpstreamPlatformUnavailable
    }

    pub fn emote_already_exists(emote: EmoteRef, name: impl Into<String>) -> Self {
        Self::EmoteAlreadyExists {
            emote,
            name: name.into(),
        }
    }

    pub fn emote_not_found(name: impl Into<String>) -> Self {
        Self::EmoteNotFound { name: name.into() }
    }

    pub fn permission_denied(name: impl Into<String>) -> Self {
        Self::PermissionDenied { name: name.into() }
    }

    pub fn nsfw_in_safe_channel(name: impl Into<String>) -> Self {
        Self::NsfwInSafeChannel { name: name.into() }
    }

    /// Callers only construct this when `actual_length > max_length`; the
    /// values are stored as given either way (see [`Self::is_consistent`]).
    pub fn description_too_long(
        name: impl Into<String>,
        actual_length: usize,
        max_length: usize,
    ) -> Self {
        Self::DescriptionTooLong {
            name: name.into(),
            actual_length,
            max_length,
        }
    }

    // --- Catalog metadata ---

    /// The catalog code of this variant.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Blacklisted { .. } => ErrorCode::Blacklisted,
            Self::HttpFailure { .. } => ErrorCode::HttpFailure,
            Self::InvalidImage => ErrorCode::InvalidImage,
            Self::FetchTimeout => ErrorCode::FetchTimeout,
            Self::ResizeTimeout => ErrorCode::ResizeTimeout,
            Self::EmoteAlreadyExists { .. } => ErrorCode::EmoteAlreadyExists,
            Self::EmoteNotFound { .. } => ErrorCode::EmoteNotFound,
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::DescriptionTooLong { .. } => ErrorCode::DescriptionTooLong,
            Self::NoStorageSlotsAvailable => ErrorCode::NoStorageSlotsAvailable,
            Self::UpstreamPlatformUnavailable => ErrorCode::UpstreamPlatformUnavailable,
            Self::NsfwInSafeChannel { .. } => ErrorCode::NsfwInSafeChannel,
        }
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    #[must_use]
    pub const fn template_key(&self) -> &'static str {
        self.code().template_key()
    }

    // --- Classification ---

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.code().is_timeout()
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        self.code().is_invalid_argument()
    }

    #[must_use]
    pub const fn is_user_attributable(&self) -> bool {
        self.code().is_user_attributable()
    }

    #[must_use]
    pub const fn remedy(&self) -> Remedy {
        self.code().remedy()
    }

    /// False only for a `DescriptionTooLong` whose actual length does not
    /// exceed its limit.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self {
            Self::DescriptionTooLong {
                actual_length,
                max_length,
                ..
            } => actual_length > max_length,
            _ => true,
        }
    }

    // --- Payload accessors ---

    /// Name of the emote the error is about, if any.
    pub fn emote_name(&self) -> Option<&str> {
        match self {
            Self::EmoteAlreadyExists { name, .. }
            | Self::EmoteNotFound { name }
            | Self::PermissionDenied { name }
            | Self::DescriptionTooLong { name, .. }
            | Self::NsfwInSafeChannel { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Upstream status code of an `HttpFailure`.
    pub fn status(&self) -> Option<i64> {
        match self {
            Self::HttpFailure { status } => Some(*status),
            _ => None,
        }
    }

    /// The colliding emote of an `EmoteAlreadyExists`.
    pub fn emote(&self) -> Option<&EmoteRef> {
        match self {
            Self::EmoteAlreadyExists { emote, .. } => Some(emote),
            _ => None,
        }
    }

    /// `(actual_length, max_length)` of a `DescriptionTooLong`.
    pub fn lengths(&self) -> Option<(usize, usize)> {
        match self {
            Self::DescriptionTooLong {
                actual_length,
                max_length,
                ..
            } => Some((*actual_length, *max_length)),
            _ => None,
        }
    }

    // --- Rendering ---

    /// Named parameters available to this variant's template.
    pub fn template_args(&self) -> TemplateArgs {
        let args = TemplateArgs::new();
        match self {
            Self::Blacklisted { prefix, reason } => {
                args.with("prefix", prefix).with("reason", reason)
            }
            Self::HttpFailure { status } => args.with("status", status),
            Self::EmoteAlreadyExists { name, .. }
            | Self::EmoteNotFound { name }
            | Self::PermissionDenied { name }
            | Self::NsfwInSafeChannel { name } => args.with("name", name),
            Self::DescriptionTooLong {
                name,
                actual_length,
                max_length,
            } => args
                .with("name", name)
                .with("actual_length", actual_length)
                .with("max_length", max_length)
                .with("limit", max_length),
            Self::InvalidImage
            | Self::FetchTimeout
            | Self::ResizeTimeout
            | Self::NoStorageSlotsAvailable
            | Self::UpstreamPlatformUnavailable => args,
        }
    }

    /// Render the user-facing message in `locale`.
    ///
    /// Keys the locale does not translate use the English template.
    pub fn render(&self, locale: &dyn LocaleLookup) -> String {
        let code = self.code();
        let template = locale
            .lookup(code.template_key())
            .unwrap_or_else(|| code.fallback_template());

        let out = substitute(template, &self.template_args());
        if !out.unresolved.is_empty() {
            warn!(
                locale = locale.tag(),
                key = code.template_key(),
                unresolved = ?out.unresolved,
                "Locale template references unknown parameters"
            );
        }
        out.text
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&English))
    }
}

impl std::error::Error for ServiceError {}

/// Whether `err` is any of the timeout variants.
pub fn classify_as_timeout(err: &ServiceError) -> bool {
    err.is_timeout()
}

/// Whether `err` is any of the invalid-argument variants.
pub fn classify_as_invalid_argument(err: &ServiceError) -> bool {
    err.is_invalid_argument()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parrot() -> EmoteRef {
        EmoteRef::new(431_093_484_723_994_624, "partyparrot", true)
    }

    /// One instance of every variant.
    fn every_variant() -> Vec<ServiceError> {
        vec![
            ServiceError::blacklisted("!", "spamming"),
            ServiceError::http_failure(404),
            ServiceError::invalid_image(),
            ServiceError::fetch_timeout(),
            ServiceError::resize_timeout(),
            ServiceError::emote_already_exists(parrot(), "partyparrot"),
            ServiceError::emote_not_found("foo"),
            ServiceError::permission_denied("foo"),
            ServiceError::description_too_long("partyparrot", 300, 200),
            ServiceError::no_storage_slots_available(),
            ServiceError::upstream_platform_unavailable(),
            ServiceError::nsfw_in_safe_channel("lewd"),
        ]
    }

    #[test]
    fn test_every_code_is_covered() {
        let codes: Vec<ErrorCode> = every_variant().iter().map(ServiceError::code).collect();
        for code in ErrorCode::all() {
            assert!(codes.contains(code), "{:?} missing from fixture", code);
        }
    }

    #[test]
    fn test_classification_over_full_variant_set() {
        for err in every_variant() {
            assert_eq!(
                classify_as_timeout(&err),
                matches!(
                    err,
                    ServiceError::FetchTimeout | ServiceError::ResizeTimeout
                ),
                "{:?}",
                err
            );
            assert_eq!(
                classify_as_invalid_argument(&err),
                matches!(err, ServiceError::NsfwInSafeChannel { .. }),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_payloads_are_retrievable() {
        assert_eq!(ServiceError::http_failure(503).status(), Some(503));
        assert_eq!(
            ServiceError::description_too_long("x", 300, 200).lengths(),
            Some((300, 200))
        );
        let err = ServiceError::emote_already_exists(parrot(), "partyparrot");
        assert_eq!(err.emote(), Some(&parrot()));
        assert_eq!(err.emote_name(), Some("partyparrot"));
        assert_eq!(ServiceError::invalid_image().emote_name(), None);
        assert_eq!(ServiceError::invalid_image().status(), None);
    }

    #[test]
    fn test_emote_family_always_carries_name() {
        for err in every_variant() {
            if err.category() == ErrorCategory::Emote {
                assert!(err.emote_name().is_some(), "{:?}", err);
            }
        }
    }

    #[test]
    fn test_english_rendering() {
        assert_eq!(
            ServiceError::http_failure(503).to_string(),
            "URL error: server returned error code 503"
        );
        assert_eq!(
            ServiceError::emote_not_found("foo").to_string(),
            "An emote called “foo” does not exist in my database."
        );
        assert_eq!(
            ServiceError::nsfw_in_safe_channel("lewd").to_string(),
            "“lewd” is NSFW, but this channel is SFW."
        );
        assert_eq!(
            ServiceError::blacklisted("!", "spamming").to_string(),
            "Sorry, you have been blacklisted for “spamming”. \
             To appeal, please join the support server by running __!support__."
        );
    }

    #[test]
    fn test_description_too_long_shows_limit_only() {
        let rendered = ServiceError::description_too_long("partyparrot", 300, 200).render(&English);
        assert!(rendered.contains("200"));
        assert!(!rendered.contains("300"));
    }

    #[test]
    fn test_no_placeholders_left_in_english() {
        for err in every_variant() {
            let rendered = err.render(&English);
            assert!(!rendered.contains('{'), "{:?} -> {}", err, rendered);
            assert!(!rendered.contains('}'), "{:?} -> {}", err, rendered);
        }
    }

    #[test]
    fn test_args_match_catalog_params() {
        for err in every_variant() {
            let names: Vec<&str> = err.template_args().names().collect();
            assert_eq!(names, err.code().params(), "{:?}", err);
        }
    }

    #[test]
    fn test_inconsistent_description_is_accepted() {
        let err = ServiceError::description_too_long("x", 10, 200);
        assert!(!err.is_consistent());
        assert_eq!(err.lengths(), Some((10, 200)));
        assert!(ServiceError::description_too_long("x", 201, 200).is_consistent());
        assert!(ServiceError::invalid_image().is_consistent());
    }

    #[test]
    fn test_service_result_propagates_unchanged() {
        fn fetch() -> ServiceResult<Vec<u8>> {
            Err(ServiceError::fetch_timeout())
        }
        fn handler() -> ServiceResult<usize> {
            let bytes = fetch()?;
            Ok(bytes.len())
        }
        assert_eq!(handler(), Err(ServiceError::FetchTimeout));
    }

    #[test]
    fn test_is_send_sync_error() {
        fn assert_bounds<T: std::error::Error + Send + Sync + 'static>() {}
        assert_bounds::<ServiceError>();
    }
}
