//! Property-based tests for snippet template parsing and rendering

use std::collections::HashMap;

use proptest::prelude::*;
use surround_core::snippet::{render, render_with_resolver, Node};
use surround_core::{parse_snippet_template, SelectionResolver};

// ========== Generators ==========

// Arbitrary text including the characters that need escaping
fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ${}\\\\\n\t:/|,é]{0,40}"
}

// Text the parser never treats specially
fn arb_plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.;()\n\t]{0,40}"
}

fn escape(text: &str) -> String {
    let mut out = String::new();
    for c in text.chars() {
        if matches!(c, '$' | '}' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// Choice fields use their own indexes and literal text never starts with a
// digit, so a choice index is never shared with another field
fn arb_template() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-z ,.;()\n]{0,10}",
            (0u32..5).prop_map(|index| format!("${index}")),
            (1u32..5, "[a-z]{0,6}").prop_map(|(index, text)| format!("${{{index}:{text}}}")),
            Just("$TM_SELECTED_TEXT".to_string()),
            (5u32..8).prop_map(|index| format!("${{{index}|one,two|}}")),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Plain text renders as itself with no tabstops
    #[test]
    fn plain_text_renders_verbatim(text in arb_plain_text()) {
        let template = parse_snippet_template(&text).unwrap();
        let rendered = render(&template);

        prop_assert_eq!(&rendered.text, &text);
        prop_assert!(rendered.tabstops.is_empty());
    }

    /// Escaping `$`, `}` and `\` makes any text literal
    #[test]
    fn escaped_text_is_literal(text in arb_text()) {
        let template = parse_snippet_template(&escape(&text)).unwrap();
        prop_assert!(template.nodes.iter().all(|node| matches!(node, Node::Text(_))));
        prop_assert_eq!(render(&template).text, text);
    }

    /// The selection is inserted verbatim, whatever it contains
    #[test]
    fn selection_is_inserted_verbatim(prefix in arb_plain_text(), selection in arb_text()) {
        let template = parse_snippet_template(&format!("{prefix}$TM_SELECTED_TEXT$0")).unwrap();
        let rendered = render_with_resolver(&template, &SelectionResolver::new(selection.clone()));

        prop_assert_eq!(&rendered.text, &format!("{prefix}{selection}"));
        prop_assert_eq!(rendered.final_cursor(), rendered.text.chars().count());
    }

    /// Every tabstop range lies inside the rendered text and covers the
    /// text the field produced
    #[test]
    fn tabstop_ranges_are_in_bounds(source in arb_template(), selection in arb_plain_text()) {
        let template = parse_snippet_template(&source).unwrap();
        let rendered = render_with_resolver(&template, &SelectionResolver::new(selection));
        let chars: Vec<char> = rendered.text.chars().collect();

        for (index, ranges) in &rendered.tabstops {
            for range in ranges {
                prop_assert!(range.start <= range.end && range.end <= chars.len());
                if let Some(options) = rendered.choices.get(index) {
                    let inserted: String = chars[range.clone()].iter().collect();
                    prop_assert_eq!(&inserted, &options[0]);
                }
            }
        }
    }

    /// Tabstop indexes reported by the template match the rendered ones
    #[test]
    fn tabstop_indexes_match_render(source in arb_template()) {
        let template = parse_snippet_template(&source).unwrap();
        let rendered = render(&template);

        let mut indexes = template.tabstop_indexes();
        indexes.sort_unstable();
        indexes.dedup();
        let rendered_indexes: Vec<u32> = rendered.tabstops.keys().copied().collect();
        prop_assert_eq!(indexes, rendered_indexes);
    }

    /// A variable default is used exactly when the variable has no value
    #[test]
    fn variable_default_fallback(default in "[a-z]{1,8}", value in prop::option::of("[a-z]{0,8}")) {
        let template = parse_snippet_template(&format!("${{CUSTOM:{default}}}")).unwrap();
        let mut vars = HashMap::new();
        if let Some(value) = &value {
            vars.insert("CUSTOM".to_string(), value.clone());
        }

        let rendered = render_with_resolver(&template, &vars);

        let expected = value.filter(|v| !v.is_empty()).unwrap_or(default);
        prop_assert_eq!(rendered.text, expected);
    }
}

#[test]
fn unterminated_placeholder_is_rejected() {
    assert!(parse_snippet_template("if (${1:cond").is_err());
    assert!(parse_snippet_template("${1|a,b").is_err());
    assert!(parse_snippet_template("${}").is_err());
}

#[test]
fn transform_upcases_selection() {
    let template = parse_snippet_template("${TM_SELECTED_TEXT/(.*)/${1:/upcase}/}").unwrap();
    let rendered = render_with_resolver(&template, &SelectionResolver::new("shout"));
    assert_eq!(rendered.text, "SHOUT");
}
