//! Snippet template engine
//!
//! Parses TextMate-style snippet bodies and renders them around the
//! selected text.

mod render;
mod syntax;
mod vars;

pub use render::{
    apply_transform, render, render_with_resolver, NoVars, RenderedSnippet, SnippetVarResolver,
};
pub use syntax::{
    parse_snippet_template, Field, FieldKind, Node, SnippetTemplate, Transform, TransformSource,
    Var,
};
pub use vars::SelectionResolver;
