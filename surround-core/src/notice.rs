//! One-time "what's new" notice
//!
//! After an upgrade the user sees a single message linking to the release
//! notes. If the window is not focused at activation the message waits for
//! the next focus gain.

use chrono::Utc;

use crate::config::ConfigManager;
use crate::host::{EditorHost, NoticeAction};

/// Release notes link shown with the notice
pub const RELEASE_NOTES_URL: &str = "https://github.com/yatki/vscode-surround/blob/master/CHANGELOG.md";

/// Project home link shown with the notice
pub const REPOSITORY_URL: &str = "https://github.com/yatki/vscode-surround";

/// Notice state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateNotice {
    /// The notice for `version` still has to be shown
    Pending { version: String },
    /// Nothing left to show
    Shown,
}

impl UpdateNotice {
    /// Decides whether the notice for `current` is due
    ///
    /// It is due when notifications are enabled and the last version the
    /// user was told about differs from `current`, including when no version
    /// was ever recorded.
    #[must_use]
    pub fn check(last_seen: Option<&str>, current: &str, enabled: bool) -> Self {
        if !enabled || last_seen == Some(current) {
            Self::Shown
        } else {
            Self::Pending {
                version: current.to_string(),
            }
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Shows the notice now if the window has focus
    ///
    /// Returns true if the notice was shown.
    pub fn on_activate<H>(&mut self, host: &mut H, config: &ConfigManager) -> bool
    where
        H: EditorHost + ?Sized,
    {
        if !self.is_pending() {
            return false;
        }
        if host.is_window_focused() {
            self.show(host, config)
        } else {
            tracing::info!("Window not focused, deferring update notice");
            false
        }
    }

    /// Shows a pending notice once the window gains focus
    ///
    /// Returns true if the notice was shown.
    pub fn on_focus_changed<H>(&mut self, host: &mut H, config: &ConfigManager, focused: bool) -> bool
    where
        H: EditorHost + ?Sized,
    {
        focused && self.show(host, config)
    }

    fn show<H>(&mut self, host: &mut H, config: &ConfigManager) -> bool
    where
        H: EditorHost + ?Sized,
    {
        let Self::Pending { version } = std::mem::replace(self, Self::Shown) else {
            return false;
        };

        let mut state = config.load_state().unwrap_or_else(|err| {
            tracing::warn!(%err, "Discarding unreadable state file");
            crate::config::SurroundState::default()
        });
        state.last_seen_version = Some(version.clone());
        state.notified_at = Some(Utc::now());
        if let Err(err) = config.save_state(&state) {
            tracing::warn!(%err, "Failed to record update notice");
        }

        let message = format!(
            "Surround has been updated to v{version}. Check out the release notes to see what's new."
        );
        let actions = [
            NoticeAction::new("Release Notes", RELEASE_NOTES_URL),
            NoticeAction::new("Repository", REPOSITORY_URL),
        ];

        if let Some(action) = host.show_information(&message, &actions) {
            if let Err(err) = host.open_external(&action.url) {
                tracing::warn!(%err, url = %action.url, "Failed to open link");
            }
        }

        tracing::info!(%version, "Showed update notice");
        true
    }
}
