//! Application settings model
//!
//! This module defines the settings stored in `settings.toml` and the
//! small piece of persisted state kept in `state.toml`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::SurroundItemConfig;

/// Surround settings
///
/// ```toml
/// show_recently_used_first = true
///
/// [with.block]
/// disabled = true
///
/// [custom.htmlComment]
/// label = "HTML Comment"
/// snippet = "<!-- $TM_SELECTED_TEXT -->"
/// language_ids = ["html"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundSettings {
    /// Patches applied to the built-in entries, by key
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub with: IndexMap<String, SurroundItemConfig>,
    /// User-defined entries, by key
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub custom: IndexMap<String, SurroundItemConfig>,
    /// Leave the built-in entries out of the catalog
    #[serde(default, alias = "showOnlyUserDefinedSnippets")]
    pub show_only_user_defined_snippets: bool,
    /// Move the last chosen entry to the top of the list
    #[serde(default = "default_true", alias = "showRecentlyUsedFirst")]
    pub show_recently_used_first: bool,
    /// Show the "what's new" message after an upgrade
    #[serde(default = "default_true", alias = "showUpdateNotification")]
    pub show_update_notification: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for SurroundSettings {
    fn default() -> Self {
        Self {
            with: IndexMap::new(),
            custom: IndexMap::new(),
            show_only_user_defined_snippets: false,
            show_recently_used_first: default_true(),
            show_update_notification: default_true(),
        }
    }
}

/// State persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurroundState {
    /// Version the user was last notified about
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen_version: Option<String>,
    /// When that notification was shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notified_at: Option<DateTime<Utc>>,
}
