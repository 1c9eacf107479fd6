//! Per-activation session state
//!
//! A `SurroundSession` owns the current catalog. It is rebuilt wholesale from
//! settings on every configuration change; the only in-place mutation is the
//! recency reordering after a pick.

use indexmap::IndexMap;

use crate::catalog::{Catalog, CatalogBuild};
use crate::config::SurroundSettings;
use crate::defaults;
use crate::error::ConfigError;
use crate::host::QuickPickItem;
use crate::models::SurroundItem;

/// The catalog plus the flags that shape how it is offered
#[derive(Debug, Clone, Default)]
pub struct SurroundSession {
    catalog: Catalog,
    recently_used_first: bool,
    diagnostic: Option<ConfigError>,
}

impl SurroundSession {
    /// Builds a session from settings
    ///
    /// With `show_only_user_defined_snippets` the built-in entries are left
    /// out. A rejected user map leaves the base entries in place and is kept
    /// as the session diagnostic.
    #[must_use]
    pub fn from_settings(settings: &SurroundSettings) -> Self {
        let base = if settings.show_only_user_defined_snippets {
            IndexMap::new()
        } else {
            defaults::base_items(&settings.with)
        };

        let CatalogBuild {
            catalog,
            diagnostic,
        } = Catalog::build(&base, &settings.custom);

        Self {
            catalog,
            recently_used_first: settings.show_recently_used_first,
            diagnostic,
        }
    }

    /// Wraps an existing catalog
    #[must_use]
    pub fn from_catalog(catalog: Catalog, recently_used_first: bool) -> Self {
        Self {
            catalog,
            recently_used_first,
            diagnostic: None,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Why the user entries were rejected, if they were
    #[must_use]
    pub fn diagnostic(&self) -> Option<&ConfigError> {
        self.diagnostic.as_ref()
    }

    #[must_use]
    pub fn recently_used_first(&self) -> bool {
        self.recently_used_first
    }

    /// Builds the selection list for a document language
    #[must_use]
    pub fn quick_pick_items(&self, language_id: Option<&str>) -> Vec<QuickPickItem> {
        self.catalog
            .filter_by_language(language_id)
            .iter()
            .map(QuickPickItem::from)
            .collect()
    }

    /// Resolves a picked row back to its entry and records the use
    ///
    /// Resolution runs against the same language view the list was built
    /// from. Returns `None` when nothing matches.
    pub fn choose(&mut self, picked: &QuickPickItem, language_id: Option<&str>) -> Option<SurroundItem> {
        let item = self
            .catalog
            .filter_by_language(language_id)
            .resolve_by_label(&picked.label, picked.description.as_deref())
            .cloned()?;
        self.record_use(&item);
        Some(item)
    }

    /// Returns the entry for a key-bound command
    #[must_use]
    pub fn item_for_key(&self, key: &str) -> Option<&SurroundItem> {
        self.catalog.get(key)
    }

    /// Moves `item` to the front when recency ordering is on
    pub fn record_use(&mut self, item: &SurroundItem) {
        if self.recently_used_first {
            self.catalog = self.catalog.promote_recently_used(item);
        }
    }
}
