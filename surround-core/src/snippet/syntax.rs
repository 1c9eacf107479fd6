//! Snippet template parser
//!
//! Parses the TextMate-style syntax used by surround bodies:
//!
//! - `$1`, `${1}` tabstops and `$0` as the final cursor
//! - `${1:default}` placeholders, which may nest
//! - `${1|one,two|}` choices
//! - `$NAME`, `${NAME}`, `${NAME:default}` variables
//! - `${1/regex/format/flags}` and `${NAME/regex/format/flags}` transforms
//! - `\$`, `\}` and `\\` escapes

use regex::RegexBuilder;

use crate::error::{SnippetParseError, SnippetResult};

/// A parsed snippet template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetTemplate {
    /// Top-level nodes in source order
    pub nodes: Vec<Node>,
}

/// One piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text with escapes already resolved
    Text(String),
    /// A numbered tabstop, placeholder or choice
    Field(Field),
    /// A variable such as `TM_SELECTED_TEXT`
    Var(Var),
    /// A regex transform of a tabstop or variable
    Transform(Transform),
}

/// A numbered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Tabstop index; 0 is the final cursor position
    pub index: u32,
    /// What the field renders as
    pub kind: FieldKind,
}

/// Field flavours
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Empty cursor stop
    Tabstop,
    /// Cursor stop pre-filled with nested nodes
    Placeholder(Vec<Node>),
    /// Cursor stop offering a fixed list; the first one is inserted
    Choice(Vec<String>),
}

/// A variable reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    /// Variable name
    pub name: String,
    /// Nodes used when the variable is unknown or empty
    pub default: Option<Vec<Node>>,
}

/// A regex transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transform {
    /// What is transformed
    pub source: TransformSource,
    /// Regex source
    pub regex: String,
    /// Replacement format
    pub replace: String,
    /// Regex flags (`g`, `i`, `m`, `s`)
    pub flags: String,
}

/// Input of a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformSource {
    /// The text of a tabstop
    Tabstop(u32),
    /// The value of a variable
    Var(String),
}

impl SnippetTemplate {
    /// Returns the tabstop indexes used by the template, sorted and deduplicated
    #[must_use]
    pub fn tabstop_indexes(&self) -> Vec<u32> {
        fn walk(nodes: &[Node], out: &mut Vec<u32>) {
            for node in nodes {
                match node {
                    Node::Field(field) => {
                        out.push(field.index);
                        if let FieldKind::Placeholder(children) = &field.kind {
                            walk(children, out);
                        }
                    }
                    Node::Var(Var {
                        default: Some(children),
                        ..
                    }) => walk(children, out),
                    _ => {}
                }
            }
        }

        let mut indexes = Vec::new();
        walk(&self.nodes, &mut indexes);
        indexes.sort_unstable();
        indexes.dedup();
        indexes
    }

    /// Returns true if the template references the given variable anywhere
    #[must_use]
    pub fn uses_variable(&self, name: &str) -> bool {
        fn walk(nodes: &[Node], name: &str) -> bool {
            nodes.iter().any(|node| match node {
                Node::Var(var) => {
                    var.name == name || var.default.as_deref().is_some_and(|d| walk(d, name))
                }
                Node::Field(Field {
                    kind: FieldKind::Placeholder(children),
                    ..
                }) => walk(children, name),
                Node::Transform(Transform {
                    source: TransformSource::Var(var),
                    ..
                }) => var == name,
                _ => false,
            })
        }

        walk(&self.nodes, name)
    }
}

/// Parses a snippet template
///
/// # Errors
///
/// Returns a `SnippetParseError` for unterminated or malformed `${...}`
/// constructs and for transforms whose regex does not compile.
pub fn parse_snippet_template(source: &str) -> SnippetResult<SnippetTemplate> {
    let mut parser = Parser::new(source);
    let nodes = parser.parse_nodes(None)?;
    Ok(SnippetTemplate { nodes })
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Parses nodes until the end of input, or until the `}` closing the
    /// construct opened at `open`.
    fn parse_nodes(&mut self, open: Option<usize>) -> SnippetResult<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut text = String::new();

        loop {
            let Some(c) = self.peek() else {
                return match open {
                    Some(offset) => Err(SnippetParseError::Unterminated(offset)),
                    None => {
                        flush_text(&mut text, &mut nodes);
                        Ok(nodes)
                    }
                };
            };

            match c {
                '}' if open.is_some() => {
                    self.bump();
                    flush_text(&mut text, &mut nodes);
                    return Ok(nodes);
                }
                '\\' => {
                    self.bump();
                    match self.peek() {
                        Some(next @ ('$' | '}' | '\\')) => {
                            self.bump();
                            text.push(next);
                        }
                        _ => text.push('\\'),
                    }
                }
                '$' => match self.parse_dollar()? {
                    Some(node) => {
                        flush_text(&mut text, &mut nodes);
                        nodes.push(node);
                    }
                    None => text.push('$'),
                },
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }
    }

    /// Parses whatever follows a `$`; `None` means the `$` was literal.
    fn parse_dollar(&mut self) -> SnippetResult<Option<Node>> {
        let start = self.offset();
        self.bump();

        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let index = self.parse_index(start)?;
                Ok(Some(Node::Field(Field {
                    index,
                    kind: FieldKind::Tabstop,
                })))
            }
            Some(c) if is_name_start(c) => {
                let name = self.parse_name();
                Ok(Some(Node::Var(Var {
                    name,
                    default: None,
                })))
            }
            Some('{') => {
                self.bump();
                self.parse_braced(start).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn parse_braced(&mut self, start: usize) -> SnippetResult<Node> {
        match self.peek() {
            None => Err(SnippetParseError::Unterminated(start)),
            Some('}') => Err(SnippetParseError::EmptyPlaceholder(start)),
            Some(c) if c.is_ascii_digit() => {
                let index = self.parse_index(start)?;
                match self.bump() {
                    Some('}') => Ok(Node::Field(Field {
                        index,
                        kind: FieldKind::Tabstop,
                    })),
                    Some(':') => {
                        let children = self.parse_nodes(Some(start))?;
                        Ok(Node::Field(Field {
                            index,
                            kind: FieldKind::Placeholder(children),
                        }))
                    }
                    Some('|') => {
                        let choices = self.parse_choices(start)?;
                        Ok(Node::Field(Field {
                            index,
                            kind: FieldKind::Choice(choices),
                        }))
                    }
                    Some('/') => self.parse_transform(start, TransformSource::Tabstop(index)),
                    None => Err(SnippetParseError::Unterminated(start)),
                    Some(other) => Err(SnippetParseError::InvalidPlaceholder {
                        offset: start,
                        reason: format!("unexpected '{other}' after tabstop {index}"),
                    }),
                }
            }
            Some(c) if is_name_start(c) => {
                let name = self.parse_name();
                match self.bump() {
                    Some('}') => Ok(Node::Var(Var {
                        name,
                        default: None,
                    })),
                    Some(':') => {
                        let default = self.parse_nodes(Some(start))?;
                        Ok(Node::Var(Var {
                            name,
                            default: Some(default),
                        }))
                    }
                    Some('/') => self.parse_transform(start, TransformSource::Var(name)),
                    None => Err(SnippetParseError::Unterminated(start)),
                    Some(other) => Err(SnippetParseError::InvalidPlaceholder {
                        offset: start,
                        reason: format!("unexpected '{other}' after variable {name}"),
                    }),
                }
            }
            Some(other) => Err(SnippetParseError::InvalidPlaceholder {
                offset: start,
                reason: format!("expected a tabstop index or a variable name, found '{other}'"),
            }),
        }
    }

    fn parse_index(&mut self, start: usize) -> SnippetResult<u32> {
        let mut digits = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            self.bump();
            digits.push(c);
        }

        digits
            .parse()
            .map_err(|_| SnippetParseError::InvalidPlaceholder {
                offset: start,
                reason: format!("tabstop index {digits} is too large"),
            })
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(|&c| is_name_char(c)) {
            self.bump();
            name.push(c);
        }
        name
    }

    /// Parses `a,b,c|}` after the opening `|`
    fn parse_choices(&mut self, start: usize) -> SnippetResult<Vec<String>> {
        let mut choices = Vec::new();
        let mut current = String::new();

        loop {
            match self.bump() {
                None => return Err(SnippetParseError::UnterminatedChoice(start)),
                Some('\\') => match self.peek() {
                    Some(next @ (',' | '|' | '\\' | '$' | '}')) => {
                        self.bump();
                        current.push(next);
                    }
                    _ => current.push('\\'),
                },
                Some(',') => choices.push(std::mem::take(&mut current)),
                Some('|') => {
                    if self.bump() != Some('}') {
                        return Err(SnippetParseError::UnterminatedChoice(start));
                    }
                    choices.push(current);
                    return Ok(choices);
                }
                Some(c) => current.push(c),
            }
        }
    }

    /// Parses `regex/format/flags}` after the first `/`
    fn parse_transform(&mut self, start: usize, source: TransformSource) -> SnippetResult<Node> {
        let regex = self.read_until_slash(start)?;
        let replace = self.read_until_slash(start)?;

        let mut flags = String::new();
        loop {
            match self.bump() {
                None => return Err(SnippetParseError::Unterminated(start)),
                Some('}') => break,
                Some(c) => flags.push(c),
            }
        }

        let transform = Transform {
            source,
            regex,
            replace,
            flags,
        };
        transform
            .build_regex()
            .map_err(|reason| SnippetParseError::InvalidPlaceholder {
                offset: start,
                reason,
            })?;

        Ok(Node::Transform(transform))
    }

    /// Reads up to the next unescaped `/` outside any `${...}`. Escapes other
    /// than `\/` are kept.
    fn read_until_slash(&mut self, start: usize) -> SnippetResult<String> {
        let mut out = String::new();
        let mut depth = 0usize;
        loop {
            match self.bump() {
                None => return Err(SnippetParseError::Unterminated(start)),
                Some('/') if depth == 0 => return Ok(out),
                Some('$') if self.peek() == Some('{') => {
                    self.bump();
                    depth += 1;
                    out.push_str("${");
                }
                Some('}') if depth > 0 => {
                    depth -= 1;
                    out.push('}');
                }
                Some('\\') => match self.bump() {
                    None => return Err(SnippetParseError::Unterminated(start)),
                    Some('/') => out.push('/'),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }
}

impl Transform {
    /// Compiles the transform regex with its flags
    ///
    /// # Errors
    ///
    /// Returns the regex error message, or a message naming an unknown flag.
    pub fn build_regex(&self) -> Result<regex::Regex, String> {
        let mut builder = RegexBuilder::new(&self.regex);
        for flag in self.flags.chars() {
            match flag {
                'g' => {}
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                other => return Err(format!("unknown regex flag '{other}'")),
            }
        }
        builder.build().map_err(|e| e.to_string())
    }

    /// Returns true if every match should be replaced
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }
}

fn flush_text(text: &mut String, nodes: &mut Vec<Node>) {
    if !text.is_empty() {
        nodes.push(Node::Text(std::mem::take(text)));
    }
}

const fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
