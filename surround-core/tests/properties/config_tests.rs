//! Property-based tests for settings persistence through ConfigManager

use indexmap::IndexMap;
use proptest::prelude::*;
use surround_core::{ConfigManager, LanguageFilter, SurroundItemConfig, SurroundSettings};
use tempfile::TempDir;

// ========== Generators ==========

fn arb_optional_string() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), "[a-zA-Z0-9 _-]{1,20}".prop_map(Some)]
}

fn arb_filter() -> impl Strategy<Value = Option<LanguageFilter>> {
    prop_oneof![
        Just(None),
        prop::collection::vec("-?[a-z]{1,10}|\\*", 1..4)
            .prop_map(|specs| Some(LanguageFilter::new(specs))),
    ]
}

fn arb_item_config() -> impl Strategy<Value = SurroundItemConfig> {
    (
        arb_optional_string(),
        arb_optional_string(),
        arb_optional_string(),
        prop::option::of("[a-z$ {}:\\n]{0,30}"),
        prop::option::of(any::<bool>()),
        arb_filter(),
    )
        .prop_map(
            |(label, description, detail, snippet, disabled, language_ids)| SurroundItemConfig {
                label,
                description,
                detail,
                snippet,
                disabled,
                language_ids,
            },
        )
}

fn arb_item_map() -> impl Strategy<Value = IndexMap<String, SurroundItemConfig>> {
    prop::collection::vec(("[a-z][a-zA-Z0-9]{0,12}", arb_item_config()), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_settings() -> impl Strategy<Value = SurroundSettings> {
    (
        arb_item_map(),
        arb_item_map(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(with, custom, only_user, recent_first, notify)| SurroundSettings {
                with,
                custom,
                show_only_user_defined_snippets: only_user,
                show_recently_used_first: recent_first,
                show_update_notification: notify,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Saving then loading settings gives back the same settings, in the
    /// same key order
    #[test]
    fn settings_round_trip(settings in arb_settings()) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());

        manager.save_settings(&settings).expect("Failed to save settings");
        let loaded = manager.load_settings().expect("Failed to load settings");

        let custom_keys: Vec<&String> = loaded.custom.keys().collect();
        let expected_keys: Vec<&String> = settings.custom.keys().collect();
        prop_assert_eq!(custom_keys, expected_keys);
        prop_assert_eq!(loaded, settings);
    }
}

#[test]
fn settings_file_in_camel_case() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());
    manager.ensure_config_dir().unwrap();
    std::fs::write(
        manager.settings_path(),
        r##"
showOnlyUserDefinedSnippets = true
showRecentlyUsedFirst = false

[custom.pyComment]
label = "Py Comment"
snippet = "# $TM_SELECTED_TEXT"
languageIds = "python"

[with.region]
disabled = true
"##,
    )
    .unwrap();

    let settings = manager.load_settings().unwrap();

    assert!(settings.show_only_user_defined_snippets);
    assert!(!settings.show_recently_used_first);
    assert!(settings.show_update_notification);
    assert_eq!(settings.with["region"].disabled, Some(true));
    assert_eq!(
        settings.custom["pyComment"].language_ids,
        Some(LanguageFilter::parse("python"))
    );
}
