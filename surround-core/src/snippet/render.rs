//! Snippet rendering
//!
//! Turns a parsed template into the text that gets inserted plus the
//! tabstop ranges the editor uses for cursor navigation. Ranges are char
//! offsets into the rendered text.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use regex::Captures;

use super::syntax::{FieldKind, Node, SnippetTemplate, Transform, TransformSource};

/// Supplies values for snippet variables
pub trait SnippetVarResolver {
    /// Returns the value of `name`, or `None` if the variable is unknown
    fn resolve_var(&self, name: &str) -> Option<String>;
}

/// Resolver that knows no variables
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVars;

impl SnippetVarResolver for NoVars {
    fn resolve_var(&self, _name: &str) -> Option<String> {
        None
    }
}

impl<S: std::hash::BuildHasher> SnippetVarResolver for HashMap<String, String, S> {
    fn resolve_var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A rendered snippet ready to be inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSnippet {
    /// Text to insert
    pub text: String,
    /// Char ranges of every tabstop, by index
    pub tabstops: BTreeMap<u32, Vec<Range<usize>>>,
    /// Options of choice fields, by index
    pub choices: BTreeMap<u32, Vec<String>>,
}

impl RenderedSnippet {
    /// Where the cursor ends up after the last tabstop
    ///
    /// That is the start of `$0` when present, else the end of the text.
    #[must_use]
    pub fn final_cursor(&self) -> usize {
        self.tabstops
            .get(&0)
            .and_then(|ranges| ranges.first())
            .map_or_else(|| self.text.chars().count(), |range| range.start)
    }

    /// Returns the first tabstop to visit: the lowest non-zero index
    #[must_use]
    pub fn first_tabstop(&self) -> Option<&Range<usize>> {
        self.tabstops
            .iter()
            .find(|(&index, _)| index != 0)
            .and_then(|(_, ranges)| ranges.first())
    }
}

/// Renders a template without any variables
#[must_use]
pub fn render(template: &SnippetTemplate) -> RenderedSnippet {
    render_with_resolver(template, &NoVars)
}

/// Renders a template, asking `resolver` for variable values
///
/// Unknown or empty variables fall back to their default nodes, or to
/// nothing when there is no default. A bare tabstop that repeats an earlier
/// placeholder mirrors its text.
#[must_use]
pub fn render_with_resolver(
    template: &SnippetTemplate,
    resolver: &dyn SnippetVarResolver,
) -> RenderedSnippet {
    let mut renderer = Renderer {
        resolver,
        out: RenderedSnippet::default(),
        chars: 0,
        field_text: HashMap::new(),
    };
    renderer.render_nodes(&template.nodes);
    renderer.out
}

struct Renderer<'r> {
    resolver: &'r dyn SnippetVarResolver,
    out: RenderedSnippet,
    chars: usize,
    field_text: HashMap<u32, String>,
}

impl Renderer<'_> {
    fn push_str(&mut self, text: &str) {
        self.out.text.push_str(text);
        self.chars += text.chars().count();
    }

    fn record(&mut self, index: u32, range: Range<usize>) {
        self.out.tabstops.entry(index).or_default().push(range);
    }

    fn render_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Text(text) => self.push_str(text),
                Node::Field(field) => {
                    let start = self.chars;
                    let start_byte = self.out.text.len();
                    match &field.kind {
                        FieldKind::Tabstop => {
                            if let Some(mirror) = self.field_text.get(&field.index).cloned() {
                                self.push_str(&mirror);
                            }
                        }
                        FieldKind::Placeholder(children) => {
                            self.render_nodes(children);
                            let rendered = self.out.text[start_byte..].to_string();
                            self.field_text.entry(field.index).or_insert(rendered);
                        }
                        FieldKind::Choice(options) => {
                            let first = options.first().cloned().unwrap_or_default();
                            self.push_str(&first);
                            self.field_text.entry(field.index).or_insert(first);
                            self.out
                                .choices
                                .entry(field.index)
                                .or_insert_with(|| options.clone());
                        }
                    }
                    self.record(field.index, start..self.chars);
                }
                Node::Var(var) => {
                    match self
                        .resolver
                        .resolve_var(&var.name)
                        .filter(|value| !value.is_empty())
                    {
                        Some(value) => self.push_str(&value),
                        None => {
                            if let Some(default) = &var.default {
                                self.render_nodes(default);
                            }
                        }
                    }
                }
                Node::Transform(transform) => {
                    let input = match &transform.source {
                        TransformSource::Tabstop(index) => {
                            self.field_text.get(index).cloned().unwrap_or_default()
                        }
                        TransformSource::Var(name) => {
                            self.resolver.resolve_var(name).unwrap_or_default()
                        }
                    };
                    let output = apply_transform(transform, &input);
                    self.push_str(&output);
                }
            }
        }
    }
}

/// Applies a regex transform to `input`
///
/// Without the `g` flag only the first match is replaced. Input without a
/// match is returned unchanged.
#[must_use]
pub fn apply_transform(transform: &Transform, input: &str) -> String {
    let Ok(regex) = transform.build_regex() else {
        return input.to_string();
    };

    let mut out = String::new();
    let mut last = 0;
    for caps in regex.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&input[last..whole.start()]);
        out.push_str(&expand_format(&transform.replace, &caps));
        last = whole.end();
        if !transform.is_global() {
            break;
        }
    }
    out.push_str(&input[last..]);
    out
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Expands a transform format string against regex captures
///
/// Supports `$n`, `${n}`, `${n:/upcase}`, `${n:/downcase}`,
/// `${n:/capitalize}`, `${n:+if}`, `${n:?if:else}`, `${n:-else}` and
/// `${n:else}`. Anything else is copied literally.
fn expand_format(format: &str, caps: &Captures<'_>) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '$' => {
                if let Some((consumed, text)) = expand_reference(&chars[i + 1..], caps) {
                    out.push_str(&text);
                    i += 1 + consumed;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Expands the reference after a `$`; returns the chars consumed and the text
fn expand_reference(rest: &[char], caps: &Captures<'_>) -> Option<(usize, String)> {
    let digits = |from: usize| -> (usize, Option<usize>) {
        let len = rest[from..].iter().take_while(|c| c.is_ascii_digit()).count();
        let number: String = rest[from..from + len].iter().collect();
        (len, number.parse().ok())
    };

    if rest.first() != Some(&'{') {
        let (len, index) = digits(0);
        return index.map(|index| (len, group(caps, index).to_string()));
    }

    let (len, index) = digits(1);
    let index = index?;
    let mut pos = 1 + len;

    match rest.get(pos)? {
        '}' => Some((pos + 1, group(caps, index).to_string())),
        ':' => {
            pos += 1;
            let close = find_unescaped(rest, pos, '}')?;
            let body: String = rest[pos..close].iter().collect();
            let value = group(caps, index);
            let text = match body.chars().next() {
                Some('/') => apply_case(&body[1..], value),
                Some('+') => {
                    if value.is_empty() {
                        String::new()
                    } else {
                        unescape(&body[1..])
                    }
                }
                Some('?') => {
                    let inner: Vec<char> = body[1..].chars().collect();
                    let split = find_unescaped(&inner, 0, ':').unwrap_or(inner.len());
                    let if_text: String = inner[..split].iter().collect();
                    let else_text: String = inner.get(split + 1..).unwrap_or(&[]).iter().collect();
                    if value.is_empty() {
                        unescape(&else_text)
                    } else {
                        unescape(&if_text)
                    }
                }
                Some('-') => fallback(value, &body[1..]),
                _ => fallback(value, &body),
            };
            Some((close + 1, text))
        }
        _ => None,
    }
}

fn fallback(value: &str, otherwise: &str) -> String {
    if value.is_empty() {
        unescape(otherwise)
    } else {
        value.to_string()
    }
}

fn find_unescaped(chars: &[char], from: usize, target: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == target => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn unescape(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn apply_case(modifier: &str, value: &str) -> String {
    match modifier {
        "upcase" => value.to_uppercase(),
        "downcase" => value.to_lowercase(),
        "capitalize" => {
            let mut chars = value.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
        _ => value.to_string(),
    }
}
