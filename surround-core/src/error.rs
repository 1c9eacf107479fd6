//! Error types for `Surround`
//!
//! This module defines the error types used throughout the library:
//! configuration loading and validation, snippet template parsing, and
//! failures reported back by the editor host.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `Surround` operations
#[derive(Debug, Error)]
pub enum SurroundError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snippet template syntax errors
    #[error("Snippet error: {0}")]
    Snippet(#[from] SnippetParseError),

    /// Errors reported by the editor host
    #[error("Editor error: {0}")]
    Host(#[from] HostError),
}

/// Errors related to configuration file operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// Errors produced while parsing a snippet template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetParseError {
    /// A `${` was opened but never closed
    #[error("Unterminated placeholder starting at offset {0}")]
    Unterminated(usize),

    /// A braced placeholder had no usable content, e.g. `${}`
    #[error("Empty placeholder at offset {0}")]
    EmptyPlaceholder(usize),

    /// A braced placeholder started with something that is neither an index nor a name
    #[error("Invalid placeholder at offset {offset}: {reason}")]
    InvalidPlaceholder {
        /// Byte offset of the opening `$`
        offset: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A `${1|...|}` choice list was not closed
    #[error("Unterminated choice list at offset {0}")]
    UnterminatedChoice(usize),
}

/// Errors reported by the editor host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host refused or failed the edit
    #[error("Failed to insert snippet: {0}")]
    InsertFailed(String),

    /// The host could not open an external link
    #[error("Failed to open {url}: {reason}")]
    OpenFailed {
        /// The link that was requested
        url: String,
        /// Why it failed
        reason: String,
    },
}

/// Result type alias for `Surround` operations
pub type Result<T> = std::result::Result<T, SurroundError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for snippet template parsing
pub type SnippetResult<T> = std::result::Result<T, SnippetParseError>;

/// Result type alias for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;
