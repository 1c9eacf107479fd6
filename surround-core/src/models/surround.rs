//! Surround entry model and its raw configuration form.

use serde::{Deserialize, Serialize};

use super::LanguageFilter;
use crate::error::{ConfigError, ConfigResult};

/// A named template that wraps the current selection
///
/// Only valid entries exist as `SurroundItem`; anything read from a user's
/// configuration goes through [`SurroundItemConfig::validate`] first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundItem {
    /// Configuration key, used to namespace the per-entry command
    pub key: String,
    /// Text shown in the selection list
    pub label: String,
    /// Secondary text shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional detail line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Snippet template body
    pub snippet: String,
    /// Disabled entries never reach the catalog
    #[serde(default)]
    pub disabled: bool,
    /// Languages this entry applies to; `None` means all of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_ids: Option<LanguageFilter>,
}

impl SurroundItem {
    /// Creates an enabled entry that applies to every language
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: None,
            detail: None,
            snippet: snippet.into(),
            disabled: false,
            language_ids: None,
        }
    }

    /// Sets the description for this entry
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the detail line for this entry
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Restricts this entry to the given language specs
    #[must_use]
    pub fn with_language_ids(mut self, filter: LanguageFilter) -> Self {
        self.language_ids = Some(filter);
        self
    }

    /// Marks this entry as disabled
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns true if this entry should be offered for `language_id`
    ///
    /// An empty filter counts as no filter.
    #[must_use]
    pub fn applies_to(&self, language_id: &str) -> bool {
        self.language_ids
            .as_ref()
            .filter(|filter| !filter.is_empty())
            .is_none_or(|filter| filter.matches(language_id))
    }

    /// Returns true if this entry is the one a `{label, description}` pick refers to
    ///
    /// When `description` is `None` only the label is compared.
    #[must_use]
    pub fn matches_pick(&self, label: &str, description: Option<&str>) -> bool {
        self.label == label
            && description.is_none_or(|desc| self.description.as_deref() == Some(desc))
    }

    /// Applies the fields set in `patch` on top of this entry
    pub fn apply(&mut self, patch: &SurroundItemConfig) {
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
        }
        if patch.description.is_some() {
            self.description.clone_from(&patch.description);
        }
        if patch.detail.is_some() {
            self.detail.clone_from(&patch.detail);
        }
        if let Some(ref snippet) = patch.snippet {
            self.snippet.clone_from(snippet);
        }
        if let Some(disabled) = patch.disabled {
            self.disabled = disabled;
        }
        if patch.language_ids.is_some() {
            self.language_ids.clone_from(&patch.language_ids);
        }
    }
}

/// A surround entry as written in the settings file
///
/// Every field is optional so that a `with` entry can patch a single field
/// of a built-in entry. User entries must validate into a [`SurroundItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundItemConfig {
    /// Text shown in the selection list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Secondary text shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Additional detail line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Snippet template body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Whether the entry is hidden
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Languages this entry applies to
    #[serde(
        default,
        alias = "languageIds",
        skip_serializing_if = "Option::is_none"
    )]
    pub language_ids: Option<LanguageFilter>,
}

impl SurroundItemConfig {
    /// Creates a config entry with a label and a snippet body
    #[must_use]
    pub fn new(label: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            snippet: Some(snippet.into()),
            ..Self::default()
        }
    }

    /// Validates this entry and turns it into a [`SurroundItem`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the label is missing or blank,
    /// or if the snippet body is missing.
    pub fn validate(&self, key: &str) -> ConfigResult<SurroundItem> {
        let label = match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            Some(_) => {
                return Err(ConfigError::Validation {
                    field: format!("{key}.label"),
                    reason: "Label cannot be empty".to_string(),
                })
            }
            None => {
                return Err(ConfigError::Validation {
                    field: format!("{key}.label"),
                    reason: "Label is required".to_string(),
                })
            }
        };

        let snippet = self.snippet.clone().ok_or_else(|| ConfigError::Validation {
            field: format!("{key}.snippet"),
            reason: "Snippet is required".to_string(),
        })?;

        Ok(SurroundItem {
            key: key.to_string(),
            label,
            description: self.description.clone(),
            detail: self.detail.clone(),
            snippet,
            disabled: self.disabled.unwrap_or(false),
            language_ids: self.language_ids.clone(),
        })
    }
}

impl From<&SurroundItem> for SurroundItemConfig {
    fn from(item: &SurroundItem) -> Self {
        Self {
            label: Some(item.label.clone()),
            description: item.description.clone(),
            detail: item.detail.clone(),
            snippet: Some(item.snippet.clone()),
            disabled: Some(item.disabled),
            language_ids: item.language_ids.clone(),
        }
    }
}
