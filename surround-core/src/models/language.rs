//! Language filter attached to a surround entry.

use serde::{Deserialize, Serialize};

/// Wildcard matching every language identifier
pub const ANY_LANGUAGE: &str = "*";

/// Prefix marking a language identifier as excluded
pub const EXCLUDE_PREFIX: char = '-';

/// Restricts which document languages an entry is offered for
///
/// Each spec is either `*`, a language identifier (`python`) or an
/// exclusion (`-python`). Exclusions always win for the language they name.
///
/// In configuration the filter may be written as one string, a
/// comma-separated string, or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LanguageIdsRepr", into = "Vec<String>")]
pub struct LanguageFilter {
    specs: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageIdsRepr {
    One(String),
    Many(Vec<String>),
}

impl From<LanguageIdsRepr> for LanguageFilter {
    fn from(repr: LanguageIdsRepr) -> Self {
        match repr {
            LanguageIdsRepr::One(spec) => Self::parse(&spec),
            LanguageIdsRepr::Many(specs) => Self::new(specs),
        }
    }
}

impl From<LanguageFilter> for Vec<String> {
    fn from(filter: LanguageFilter) -> Self {
        filter.specs
    }
}

impl LanguageFilter {
    /// Creates a filter from a list of specs, dropping blank ones
    #[must_use]
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            specs: specs
                .into_iter()
                .map(Into::into)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Parses a comma-separated list such as `"*, -python"`
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::new(input.split(','))
    }

    /// A filter that matches every language
    #[must_use]
    pub fn any() -> Self {
        Self::new([ANY_LANGUAGE])
    }

    /// Returns the raw specs in configuration order
    #[must_use]
    pub fn specs(&self) -> &[String] {
        &self.specs
    }

    /// Returns true if the filter has no specs at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns true if `language_id` is explicitly excluded
    #[must_use]
    pub fn excludes(&self, language_id: &str) -> bool {
        self.specs
            .iter()
            .filter_map(|spec| spec.strip_prefix(EXCLUDE_PREFIX))
            .any(|excluded| excluded == language_id)
    }

    /// Decides whether an entry with this filter applies to `language_id`
    ///
    /// Exclusion beats the wildcard and explicit matches.
    #[must_use]
    pub fn matches(&self, language_id: &str) -> bool {
        if self.excludes(language_id) {
            return false;
        }

        self.specs
            .iter()
            .any(|spec| spec == ANY_LANGUAGE || spec == language_id)
    }
}
