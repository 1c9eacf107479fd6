//! Catalog construction and lookups
//!
//! Everything here is pure: the editor glue owns the current `Catalog` and
//! swaps in a new one whenever configuration changes.

use indexmap::IndexMap;

use crate::error::{ConfigError, ConfigResult};
use crate::models::{SurroundItem, SurroundItemConfig};

/// Ordered collection of enabled surround entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<SurroundItem>,
}

/// Result of [`Catalog::build`]
///
/// `diagnostic` is set when the user map was rejected; the catalog then
/// holds the base entries only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBuild {
    /// The merged, enabled entries
    pub catalog: Catalog,
    /// Why the user map was dropped, if it was
    pub diagnostic: Option<ConfigError>,
}

impl Catalog {
    /// Creates a catalog from entries that are already validated and ordered
    ///
    /// Disabled entries are dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = SurroundItem>) -> Self {
        Self {
            items: items.into_iter().filter(|item| !item.disabled).collect(),
        }
    }

    /// Merges the base and user maps into a catalog
    ///
    /// User entries replace base entries with the same key and keep the
    /// base entry's position; new user keys are appended in map order.
    /// If any user entry fails validation the whole user map is ignored and
    /// the returned build carries the first validation error.
    #[must_use]
    pub fn build(
        base: &IndexMap<String, SurroundItem>,
        user: &IndexMap<String, SurroundItemConfig>,
    ) -> CatalogBuild {
        let (user_items, diagnostic) = match Self::validate_user_items(user) {
            Ok(items) => (items, None),
            Err(err) => {
                tracing::warn!(%err, "Ignoring custom surround entries");
                (IndexMap::new(), Some(err))
            }
        };

        let mut merged: IndexMap<String, SurroundItem> = base.clone();
        for (key, item) in user_items {
            // IndexMap::insert keeps the slot of an existing key
            merged.insert(key, item);
        }

        let catalog = Self::from_items(merged.into_values());
        tracing::debug!(entries = catalog.len(), "Built surround catalog");

        CatalogBuild {
            catalog,
            diagnostic,
        }
    }

    /// Validates every user entry, failing on the first invalid one
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first entry without a usable
    /// label or snippet.
    pub fn validate_user_items(
        user: &IndexMap<String, SurroundItemConfig>,
    ) -> ConfigResult<IndexMap<String, SurroundItem>> {
        user.iter()
            .map(|(key, config)| config.validate(key).map(|item| (key.clone(), item)))
            .collect()
    }

    /// Returns the entries offered for `language_id`
    ///
    /// With no language (no active document) the catalog is returned as is.
    #[must_use]
    pub fn filter_by_language(&self, language_id: Option<&str>) -> Self {
        let Some(language_id) = language_id else {
            return self.clone();
        };

        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.applies_to(language_id))
                .cloned()
                .collect(),
        }
    }

    /// Finds the first entry with the given label
    ///
    /// When `description` is given it must match as well.
    #[must_use]
    pub fn resolve_by_label(&self, label: &str, description: Option<&str>) -> Option<&SurroundItem> {
        self.items
            .iter()
            .find(|item| item.matches_pick(label, description))
    }

    /// Finds the entry registered under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SurroundItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Moves the chosen entry to the front
    ///
    /// The entry is located by key, so another entry sharing its label
    /// stays where it is. Everything else keeps its relative order. An
    /// unknown entry leaves the order unchanged.
    #[must_use]
    pub fn promote_recently_used(&self, chosen: &SurroundItem) -> Self {
        let Some(index) = self.items.iter().position(|item| item.key == chosen.key) else {
            return self.clone();
        };

        let mut items = self.items.clone();
        let item = items.remove(index);
        items.insert(0, item);
        Self { items }
    }

    /// Returns the entries in order
    #[must_use]
    pub fn items(&self) -> &[SurroundItem] {
        &self.items
    }

    /// Returns the entry keys in order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.key.as_str()).collect()
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, SurroundItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SurroundItem;
    type IntoIter = std::slice::Iter<'a, SurroundItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
