//! Snippet variable resolver for selection, file paths and time.

use std::path::PathBuf;

use chrono::{DateTime, Datelike, Local, Timelike};

use super::render::SnippetVarResolver;

/// Resolves variables from the text being surrounded and the file it lives in
#[derive(Debug, Clone)]
pub struct SelectionResolver {
    selected_text: String,
    file_path: Option<PathBuf>,
    now: DateTime<Local>,
}

impl SelectionResolver {
    /// Creates a resolver for `selected_text`, timestamped now
    #[must_use]
    pub fn new(selected_text: impl Into<String>) -> Self {
        Self::at(selected_text, Local::now())
    }

    /// Creates a resolver with a fixed clock
    #[must_use]
    pub fn at(selected_text: impl Into<String>, now: DateTime<Local>) -> Self {
        Self {
            selected_text: selected_text.into(),
            file_path: None,
            now,
        }
    }

    /// Sets the path of the file being edited
    #[must_use]
    pub fn with_file_path(mut self, path: Option<PathBuf>) -> Self {
        self.file_path = path;
        self
    }
}

impl SnippetVarResolver for SelectionResolver {
    fn resolve_var(&self, name: &str) -> Option<String> {
        let now = &self.now;
        let path = self.file_path.as_deref();
        match name {
            "SELECTION" | "TM_SELECTED_TEXT" => Some(self.selected_text.clone()),
            "TM_FILEPATH" => path.map(|path| path.to_string_lossy().to_string()),
            "TM_DIRECTORY" => path
                .and_then(|path| path.parent())
                .map(|parent| parent.to_string_lossy().to_string()),
            "TM_FILENAME" => path
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().to_string()),
            "TM_FILENAME_BASE" => path
                .and_then(|path| path.file_stem())
                .map(|stem| stem.to_string_lossy().to_string()),
            "CURRENT_YEAR" => Some(format!("{:04}", now.year())),
            "CURRENT_YEAR_SHORT" => Some(format!("{:02}", now.year() % 100)),
            "CURRENT_MONTH" => Some(format!("{:02}", now.month())),
            "CURRENT_DATE" => Some(format!("{:02}", now.day())),
            "CURRENT_HOUR" => Some(format!("{:02}", now.hour())),
            "CURRENT_MINUTE" => Some(format!("{:02}", now.minute())),
            "CURRENT_SECOND" => Some(format!("{:02}", now.second())),
            "CURRENT_SECONDS_UNIX" => Some(now.timestamp().to_string()),
            _ => None,
        }
    }
}
