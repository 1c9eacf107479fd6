//! `Surround` Core Library
//!
//! This crate provides the core functionality for `Surround`: the catalog of
//! surround snippets, the settings that shape it, the snippet template
//! engine, and the extension glue that drives an editor through the
//! `EditorHost` trait.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;
pub mod extension;
pub mod host;
pub mod models;
pub mod notice;
pub mod session;
pub mod snippet;

pub use catalog::{Catalog, CatalogBuild};
pub use commands::{parse_command, CommandRegistry, SurroundCommand, SURROUND_WITH};
pub use config::{ConfigManager, SurroundSettings, SurroundState};
pub use error::{
    ConfigError, ConfigResult, HostError, HostResult, SnippetParseError, SnippetResult,
    SurroundError,
};
pub use extension::{CommandOutcome, SurroundExtension, CURRENT_VERSION};
pub use host::{ActiveEditor, EditorHost, NoticeAction, QuickPickItem};
pub use models::{LanguageFilter, SurroundItem, SurroundItemConfig};
pub use notice::UpdateNotice;
pub use session::SurroundSession;
pub use snippet::{
    parse_snippet_template, render, render_with_resolver, RenderedSnippet, SelectionResolver,
    SnippetTemplate, SnippetVarResolver,
};
