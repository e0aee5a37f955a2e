//! Shared error handling for Emote Collector.
//!
//! - [`errors`]: the [`ServiceError`] taxonomy and its code catalog
//! - [`locale`]: template keys, translations, and placeholder substitution
//! - [`presentation`]: the boundary that renders and logs an error once
//! - [`config`] and [`logging`]: environment settings and tracing setup

pub mod config;
pub mod errors;
pub mod locale;
pub mod logging;
pub mod presentation;

pub use errors::{
    EmoteRef, ErrorCategory, ErrorCode, Remedy, ServiceError, ServiceResult,
    classify_as_invalid_argument, classify_as_timeout,
};
pub use locale::{Catalog, English, LocaleError, LocaleLookup, Locales};
pub use presentation::{ErrorReport, present};
