//! Localization of error messages.
//!
//! Errors carry a template key and named parameters; this module resolves
//! keys to translated templates and substitutes the parameters.

pub mod catalog;
pub mod template;

pub use catalog::{
    Catalog, English, FALLBACK_LOCALE, LocaleError, LocaleLookup, Locales, normalize_tag,
};
pub use template::{Substitution, TemplateArgs, substitute};
