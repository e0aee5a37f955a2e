//! Locale catalogs that resolve template keys to translated templates.
//!
//! Catalog files are TOML:
//!
//! ```toml
//! locale = "de"
//!
//! [messages]
//! "errors.emote_not_found" = "Ein Emote namens „{name}“ existiert nicht in meiner Datenbank."
//! ```
//!
//! Keys a catalog does not translate fall back to the English templates
//! when an error is rendered.

use crate::errors::ErrorCode;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tag of the built-in English locale.
pub const FALLBACK_LOCALE: &str = "en";

/// Errors that can occur while loading locale catalogs.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A catalog file or directory could not be read.
    #[error("Failed to read locale catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid TOML or has the wrong shape.
    #[error("Invalid locale catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A catalog translates keys that no error code uses (sorted).
    #[error("Locale {locale} translates unknown keys: {}", .keys.join(", "))]
    UnknownKey { locale: String, keys: Vec<String> },

    /// Two catalogs declare the same locale tag.
    #[error("Locale {locale} is defined more than once")]
    DuplicateLocale { locale: String },
}

/// Canonical form of a locale tag: ASCII lowercase, `-` as separator.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_ascii_lowercase()
}

/// Resolves template keys for one locale.
pub trait LocaleLookup: Send + Sync {
    /// Locale tag (e.g. "en", "pt-BR").
    fn tag(&self) -> &str;

    /// Translated template for `key`, if this locale has one.
    fn lookup(&self, key: &str) -> Option<&str>;
}

/// The built-in English locale, answering every key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct English;

impl LocaleLookup for English {
    fn tag(&self) -> &str {
        FALLBACK_LOCALE
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        ErrorCode::from_template_key(key).map(|code| code.fallback_template())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    locale: String,
    #[serde(default)]
    messages: BTreeMap<String, String>,
}

/// Translated templates for a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tag: String,
    messages: BTreeMap<String, String>,
}

impl Catalog {
    /// Build a catalog from key/template pairs.
    ///
    /// Every key must belong to an [`ErrorCode`]. Templates that drop all
    /// of their code's parameters are accepted but logged.
    pub fn new(
        tag: impl Into<String>,
        messages: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, LocaleError> {
        let tag = tag.into();
        let messages: BTreeMap<String, String> = messages.into_iter().collect();

        let unknown: Vec<String> = messages
            .keys()
            .filter(|key| ErrorCode::from_template_key(key).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(LocaleError::UnknownKey {
                locale: tag,
                keys: unknown,
            });
        }

        let catalog = Self { tag, messages };
        for key in catalog.lossy_keys() {
            warn!(
                locale = %catalog.tag,
                key,
                "Translation omits every parameter of its message"
            );
        }
        Ok(catalog)
    }

    /// Parse a catalog from TOML text. `origin` names the source in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, LocaleError> {
        let file: CatalogFile = toml::from_str(text).map_err(|source| LocaleError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::new(file.locale, file.messages)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, LocaleError> {
        let text = std::fs::read_to_string(path).map_err(|source| LocaleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Keys whose translation uses none of the parameters its code supplies.
    pub fn lossy_keys(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(key, template)| {
                ErrorCode::from_template_key(key).is_some_and(|code| {
                    let params = code.params();
                    !params.is_empty()
                        && !params
                            .iter()
                            .any(|param| template.contains(&format!("{{{param}}}")))
                })
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Number of translated keys.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl LocaleLookup for Catalog {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

/// All loaded catalogs, keyed by normalized locale tag.
#[derive(Debug, Clone, Default)]
pub struct Locales {
    catalogs: HashMap<String, Catalog>,
}

impl Locales {
    /// An empty registry; every tag resolves to English.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog. Tags differing only in case or `_`/`-` collide.
    pub fn insert(&mut self, catalog: Catalog) -> Result<(), LocaleError> {
        let tag = normalize_tag(&catalog.tag);
        if self.catalogs.contains_key(&tag) {
            return Err(LocaleError::DuplicateLocale {
                locale: catalog.tag.clone(),
            });
        }
        self.catalogs.insert(tag, catalog);
        Ok(())
    }

    /// Load every `*.toml` file in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, LocaleError> {
        let io_err = |source| LocaleError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().is_some_and(|ext| ext == "toml") && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut locales = Self::new();
        for path in paths {
            let catalog = Catalog::load(&path)?;
            debug!(
                locale = %catalog.tag(),
                keys = catalog.len(),
                path = %path.display(),
                "Loaded locale catalog"
            );
            locales.insert(catalog)?;
        }
        info!(dir = %dir.display(), count = locales.len(), "Loaded locale catalogs");
        Ok(locales)
    }

    /// Resolve a tag to a lookup.
    ///
    /// Matching ignores case and treats `_` like `-`. Tries the exact tag,
    /// then its primary language subtag (`pt-BR` -> `pt`), then falls back
    /// to [`English`].
    pub fn resolve(&self, tag: &str) -> &dyn LocaleLookup {
        let tag = normalize_tag(tag);
        if let Some(catalog) = self.catalogs.get(&tag) {
            return catalog;
        }
        if let Some(catalog) = tag
            .split_once('-')
            .and_then(|(primary, _)| self.catalogs.get(primary))
        {
            return catalog;
        }
        &English
    }

    /// Sorted list of loaded (normalized) locale tags.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}
