//! Named-placeholder message templates.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` produce literal braces.

use std::fmt;

/// Ordered named parameters for a message template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateArgs {
    entries: Vec<(&'static str, String)>,
}

impl TemplateArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, formatting the value with `Display`.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.entries.push((name, value.to_string()));
        self
    }

    /// Value of a named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of substituting parameters into a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// The rendered text.
    pub text: String,
    /// Placeholders that had no matching parameter and were kept verbatim.
    pub unresolved: Vec<String>,
}

/// Substitute `args` into `template`.
///
/// Never fails: unknown placeholders are copied through unchanged and
/// reported in [`Substitution::unresolved`], and a `{` without a closing
/// brace is emitted as-is.
pub fn substitute(template: &str, args: &TemplateArgs) -> Substitution {
    let mut text = String::with_capacity(template.len());
    let mut unresolved = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        text.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            text.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            text.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            text.push('}');
            rest = &tail[1..];
        } else {
            match tail[1..].find(['{', '}']) {
                Some(end) if tail.as_bytes()[end + 1] == b'}' => {
                    let name = &tail[1..=end];
                    match args.get(name) {
                        Some(value) => text.push_str(value),
                        None => {
                            text.push_str(&tail[..=end + 1]);
                            unresolved.push(name.to_string());
                        }
                    }
                    rest = &tail[end + 2..];
                }
                // Unclosed, or another `{` before the close: literal brace.
                _ => {
                    text.push('{');
                    rest = &tail[1..];
                }
            }
        }
    }
    text.push_str(rest);

    Substitution { text, unresolved }
}
