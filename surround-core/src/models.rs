//! Core data models for `Surround`
//!
//! This module defines the surround entries shown in the selection list,
//! the raw configuration shape they are validated from, and the language
//! filter attached to each entry.

mod language;
mod surround;

pub use language::LanguageFilter;
pub use surround::{SurroundItem, SurroundItemConfig};
