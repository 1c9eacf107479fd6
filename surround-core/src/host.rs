//! Editor host abstraction
//!
//! The extension never talks to an editor directly. Everything it needs
//! from the outside world goes through the [`EditorHost`] trait, which the
//! CLI implements for a terminal and tests implement with a recorder.

use std::path::PathBuf;

use crate::error::HostResult;
use crate::models::SurroundItem;
use crate::snippet::RenderedSnippet;

/// The document the user is working in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEditor {
    /// Language identifier of the document (e.g. "python")
    pub language_id: String,
    /// Text currently selected, empty when nothing is selected
    pub selected_text: String,
    /// Path of the document, if it is saved on disk
    pub file_path: Option<PathBuf>,
}

impl ActiveEditor {
    /// Creates an editor state for an unsaved document
    #[must_use]
    pub fn new(language_id: impl Into<String>, selected_text: impl Into<String>) -> Self {
        Self {
            language_id: language_id.into(),
            selected_text: selected_text.into(),
            file_path: None,
        }
    }

    /// Sets the document path
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

/// One row of the selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickItem {
    pub label: String,
    pub description: Option<String>,
    pub detail: Option<String>,
}

impl From<&SurroundItem> for QuickPickItem {
    fn from(item: &SurroundItem) -> Self {
        Self {
            label: item.label.clone(),
            description: item.description.clone(),
            detail: item.detail.clone(),
        }
    }
}

/// A link button attached to an information message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeAction {
    pub title: String,
    pub url: String,
}

impl NoticeAction {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Services the extension needs from the editor
pub trait EditorHost {
    /// Returns the focused document, or `None` when no editor is open
    fn active_editor(&self) -> Option<ActiveEditor>;

    /// Inserts a rendered snippet over the current selection
    ///
    /// # Errors
    ///
    /// Returns `HostError` if the editor rejects the edit.
    fn insert_snippet(&mut self, snippet: &RenderedSnippet) -> HostResult<()>;

    /// Shows the selection list; `None` means the user dismissed it
    fn show_quick_pick(&mut self, items: &[QuickPickItem]) -> Option<QuickPickItem>;

    /// Shows an information message with optional link buttons
    ///
    /// Returns the button the user clicked, if any.
    fn show_information(&mut self, message: &str, actions: &[NoticeAction]) -> Option<NoticeAction>;

    /// Shows an error message
    fn show_error(&mut self, message: &str);

    /// Opens a URL outside the editor
    ///
    /// # Errors
    ///
    /// Returns `HostError::OpenFailed` if the URL cannot be opened.
    fn open_external(&mut self, url: &str) -> HostResult<()>;

    /// Lists the ids of every command currently registered
    fn commands(&self) -> Vec<String>;

    /// Registers a command id
    fn register_command(&mut self, id: &str);

    /// Returns true if the editor window has focus
    fn is_window_focused(&self) -> bool;
}
