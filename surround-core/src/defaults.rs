//! Built-in surround entries
//!
//! These form the base map of the catalog. The `with` table in the
//! settings file patches them by key.

use indexmap::IndexMap;

use crate::models::{LanguageFilter, SurroundItem, SurroundItemConfig};

/// Languages with C-style blocks and statements
const C_LIKE: &[&str] = &[
    "c",
    "cpp",
    "csharp",
    "dart",
    "go",
    "groovy",
    "java",
    "javascript",
    "javascriptreact",
    "kotlin",
    "php",
    "rust",
    "scala",
    "swift",
    "typescript",
    "typescriptreact",
];

/// Languages with JavaScript semantics
const JS_LIKE: &[&str] = &[
    "javascript",
    "javascriptreact",
    "typescript",
    "typescriptreact",
    "vue",
    "svelte",
];

/// Markup languages where element wrapping makes sense
const MARKUP: &[&str] = &[
    "html",
    "xml",
    "javascriptreact",
    "typescriptreact",
    "vue",
    "svelte",
    "php",
];

fn filter(languages: &[&str]) -> LanguageFilter {
    LanguageFilter::new(languages.iter().copied())
}

/// Returns the shipped surround entries in display order
#[must_use]
pub fn builtin_items() -> IndexMap<String, SurroundItem> {
    let items = [
        SurroundItem::new("block", "{}", "{\n\t$TM_SELECTED_TEXT\n}$0")
            .with_description("{ ... }")
            .with_language_ids(filter(C_LIKE)),
        SurroundItem::new(
            "ifStatement",
            "if",
            "if (${1:condition}) {\n\t$TM_SELECTED_TEXT\n}$0",
        )
        .with_description("if ($condition) { ... }")
        .with_language_ids(filter(C_LIKE)),
        SurroundItem::new(
            "ifElseStatement",
            "if/else",
            "if (${1:condition}) {\n\t$TM_SELECTED_TEXT\n} else {\n\t$2\n}$0",
        )
        .with_description("if ($condition) { ... } else { $else }")
        .with_language_ids(filter(C_LIKE)),
        SurroundItem::new(
            "tryCatchStatement",
            "try/catch",
            "try {\n\t$TM_SELECTED_TEXT\n} catch (${1:err}) {\n\t$2\n}$0",
        )
        .with_description("try { ... } catch (err) { $catchBlock }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "tryFinallyStatement",
            "try/finally",
            "try {\n\t$TM_SELECTED_TEXT\n} finally {\n\t$1\n}$0",
        )
        .with_description("try { ... } finally { $finalBlock }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "tryCatchFinallyStatement",
            "try/catch/finally",
            "try {\n\t$TM_SELECTED_TEXT\n} catch (${1:err}) {\n\t$2\n} finally {\n\t$3\n}$0",
        )
        .with_description("try { ... } catch (err) { $catchBlock } finally { $finalBlock }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new("forLoop", "for", "for ($1) {\n\t$TM_SELECTED_TEXT\n}$0")
            .with_description("for ($1) { ... }")
            .with_language_ids(filter(C_LIKE)),
        SurroundItem::new(
            "forEachLoop",
            "forEach",
            "${1:items}.forEach((${2:item}) => {\n\t$TM_SELECTED_TEXT\n});$0",
        )
        .with_description("items.forEach((item) => { ... })")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new("whileLoop", "while", "while (${1:condition}) {\n\t$TM_SELECTED_TEXT\n}$0")
            .with_description("while ($condition) { ... }")
            .with_language_ids(filter(C_LIKE)),
        SurroundItem::new(
            "function",
            "function",
            "function ${1:name}($2) {\n\t$TM_SELECTED_TEXT\n}$0",
        )
        .with_description("function $name ($params) { ... }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "asyncFunction",
            "async function",
            "async function ${1:name}($2) {\n\t$TM_SELECTED_TEXT\n}$0",
        )
        .with_description("async function $name ($params) { ... }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "arrowFunction",
            "() => {}",
            "const ${1:name} = ($2) => {\n\t$TM_SELECTED_TEXT\n}$0",
        )
        .with_description("const $name = ($params) => { ... }")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "region",
            "#region",
            "//#region ${1:name}\n$TM_SELECTED_TEXT\n//#endregion$0",
        )
        .with_description("#region $name ... #endregion")
        .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new("templateLiteral", "``", "`$TM_SELECTED_TEXT`$0")
            .with_description("`...`")
            .with_language_ids(filter(JS_LIKE)),
        SurroundItem::new(
            "element",
            "<element>",
            "<${1:div}>\n\t$TM_SELECTED_TEXT\n</${1:div}>$0",
        )
        .with_description("<$element>...</$element>")
        .with_language_ids(filter(MARKUP)),
        SurroundItem::new("blockComment", "/* */", "/* $TM_SELECTED_TEXT */$0")
            .with_description("/* ... */")
            .with_language_ids(LanguageFilter::new(
                C_LIKE.iter().copied().chain(["css", "scss", "less"]),
            )),
        SurroundItem::new("parentheses", "()", "($TM_SELECTED_TEXT)$0")
            .with_description("( ... )")
            .with_language_ids(LanguageFilter::new(["*", "-plaintext"])),
        SurroundItem::new("doubleQuotes", "\"\"", "\"$TM_SELECTED_TEXT\"$0")
            .with_description("\" ... \""),
    ];

    items.into_iter().map(|item| (item.key.clone(), item)).collect()
}

/// Returns the built-in entries with the settings' `with` patches applied
///
/// A patch for an unknown key adds a new base entry if it validates; an
/// invalid one is skipped with a warning. A patch that would blank the
/// label of a built-in entry is ignored.
#[must_use]
pub fn base_items(patches: &IndexMap<String, SurroundItemConfig>) -> IndexMap<String, SurroundItem> {
    let mut items = builtin_items();

    for (key, patch) in patches {
        if let Some(item) = items.get_mut(key) {
            let mut patched = item.clone();
            patched.apply(patch);
            if patched.label.trim().is_empty() {
                tracing::warn!(key = %key, "Ignoring patch that clears a built-in label");
                continue;
            }
            *item = patched;
            continue;
        }

        match patch.validate(key) {
            Ok(item) => {
                items.insert(key.clone(), item);
            }
            Err(err) => tracing::warn!(%err, "Skipping surround entry"),
        }
    }

    items
}
