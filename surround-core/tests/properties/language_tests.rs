//! Property-based tests for language filtering

use proptest::prelude::*;
use surround_core::{Catalog, LanguageFilter, SurroundItem};

// ========== Generators ==========

fn arb_language() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("python".to_string()),
        Just("javascript".to_string()),
        Just("html".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_spec() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        arb_language(),
        arb_language().prop_map(|language| format!("-{language}")),
    ]
}

fn arb_filter() -> impl Strategy<Value = Option<LanguageFilter>> {
    prop_oneof![
        Just(None),
        prop::collection::vec(arb_spec(), 0..5).prop_map(|specs| Some(LanguageFilter::new(specs))),
    ]
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(arb_filter(), 0..12).prop_map(|filters| {
        Catalog::from_items(filters.into_iter().enumerate().map(|(index, filter)| {
            let mut item = SurroundItem::new(format!("k{index}"), format!("L{index}"), "$0");
            item.language_ids = filter;
            item
        }))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Filtering twice by the same language changes nothing
    #[test]
    fn filter_is_idempotent(catalog in arb_catalog(), language in arb_language()) {
        let once = catalog.filter_by_language(Some(&language));
        let twice = once.filter_by_language(Some(&language));
        prop_assert_eq!(once, twice);
    }

    /// Without a language the catalog comes back unchanged
    #[test]
    fn no_language_keeps_everything(catalog in arb_catalog()) {
        prop_assert_eq!(catalog.filter_by_language(None), catalog);
    }

    /// An exclusion beats the wildcard and explicit matches
    #[test]
    fn exclusion_wins(mut specs in prop::collection::vec(arb_spec(), 0..5), language in arb_language()) {
        specs.push("*".to_string());
        specs.push(language.clone());
        specs.push(format!("-{language}"));
        let filter = LanguageFilter::new(specs);

        prop_assert!(!filter.matches(&language));

        let item = SurroundItem::new("k", "L", "$0").with_language_ids(filter);
        let catalog = Catalog::from_items([item]);
        prop_assert!(catalog.filter_by_language(Some(&language)).is_empty());
    }

    /// The wildcard matches any language that is not excluded
    #[test]
    fn wildcard_matches_unexcluded(language in arb_language()) {
        let filter = LanguageFilter::new(["*", "-zzzzzzzzz"]);
        prop_assert!(filter.matches(&language));
    }

    /// Entries without a filter are offered for every language
    #[test]
    fn unfiltered_entries_always_apply(language in arb_language()) {
        let item = SurroundItem::new("k", "L", "$0");
        prop_assert!(item.applies_to(&language));

        let empty = item.with_language_ids(LanguageFilter::new(Vec::<String>::new()));
        prop_assert!(empty.applies_to(&language));
    }

    /// Filtering keeps the catalog order
    #[test]
    fn filter_preserves_order(catalog in arb_catalog(), language in arb_language()) {
        let filtered = catalog.filter_by_language(Some(&language));
        let all = catalog.keys();
        let mut last = None;
        for key in filtered.keys() {
            let position = all.iter().position(|k| *k == key);
            prop_assert!(position.is_some());
            prop_assert!(position > last);
            last = position;
        }
    }
}

#[test]
fn scenario_python_entry_hidden_for_javascript() {
    let catalog = Catalog::from_items([
        SurroundItem::new("html", "HTML Comment", "<!-- $TM_SELECTED_TEXT -->"),
        SurroundItem::new("py", "Py Comment", "# $TM_SELECTED_TEXT")
            .with_language_ids(LanguageFilter::parse("python")),
    ]);

    let filtered = catalog.filter_by_language(Some("javascript"));

    let labels: Vec<&str> = filtered.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["HTML Comment"]);
}

#[test]
fn comma_separated_filter_in_settings() {
    #[derive(serde::Deserialize)]
    struct Doc {
        ids: LanguageFilter,
    }

    let filter = toml::from_str::<Doc>("ids = \"*, -python\"").unwrap().ids;

    assert_eq!(filter.specs(), ["*", "-python"]);
    assert!(filter.matches("rust"));
    assert!(!filter.matches("python"));
}
