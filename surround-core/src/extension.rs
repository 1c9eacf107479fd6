//! Extension lifecycle and command handlers
//!
//! `SurroundExtension` wires settings, the session, command registration and
//! the update notice to an [`EditorHost`]. Every handler takes `&mut self`,
//! so the host drives it one event at a time.

use crate::commands::{parse_command, CommandRegistry, SurroundCommand};
use crate::config::{ConfigManager, SurroundSettings};
use crate::error::{HostError, SnippetParseError};
use crate::host::{ActiveEditor, EditorHost};
use crate::models::SurroundItem;
use crate::notice::UpdateNotice;
use crate::session::SurroundSession;
use crate::snippet::{parse_snippet_template, render_with_resolver, SelectionResolver};

/// Version compared against the stored state for the update notice
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// What a command invocation ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The entry with this key was inserted
    Inserted { key: String },
    /// There was no editor to insert into
    NoActiveEditor,
    /// The user dismissed the selection list
    Dismissed,
    /// The picked label or the bound key is not in the catalog
    NotFound,
    /// The entry's snippet body does not parse
    InvalidTemplate(SnippetParseError),
    /// The host refused the edit
    InsertFailed(HostError),
    /// The id is not one of ours
    UnknownCommand,
}

/// The running extension
#[derive(Debug)]
pub struct SurroundExtension<H: EditorHost> {
    host: H,
    config: ConfigManager,
    session: SurroundSession,
    commands: CommandRegistry,
    notice: UpdateNotice,
}

impl<H: EditorHost> SurroundExtension<H> {
    /// Loads settings, builds the catalog, registers commands and runs the
    /// update notice check
    pub fn activate(mut host: H, config: ConfigManager) -> Self {
        let settings = load_settings(&mut host, &config);
        let session = build_session(&mut host, &settings);

        let mut commands = CommandRegistry::new();
        commands.register_all(&mut host, session.catalog().keys());

        let state = config.load_state().unwrap_or_else(|err| {
            tracing::warn!(%err, "Discarding unreadable state file");
            crate::config::SurroundState::default()
        });
        let mut notice = UpdateNotice::check(
            state.last_seen_version.as_deref(),
            CURRENT_VERSION,
            settings.show_update_notification,
        );
        notice.on_activate(&mut host, &config);

        tracing::info!(
            entries = session.catalog().len(),
            version = CURRENT_VERSION,
            "Surround activated"
        );

        Self {
            host,
            config,
            session,
            commands,
            notice,
        }
    }

    /// Rebuilds the session from the settings file
    ///
    /// Commands for new keys are registered; the recency order is reset.
    pub fn on_configuration_changed(&mut self) {
        let settings = load_settings(&mut self.host, &self.config);
        self.session = build_session(&mut self.host, &settings);
        let added = self
            .commands
            .register_all(&mut self.host, self.session.catalog().keys());
        tracing::debug!(added, "Configuration reloaded");
    }

    /// Runs a command by id
    pub fn execute_command(&mut self, id: &str) -> CommandOutcome {
        match parse_command(id) {
            Some(SurroundCommand::With) => self.surround_with(),
            Some(SurroundCommand::WithKey(key)) => self.surround_with_key(&key),
            None => {
                tracing::debug!(command = id, "Ignoring unknown command");
                CommandOutcome::UnknownCommand
            }
        }
    }

    /// Forwards a window focus change to the update notice
    pub fn on_window_focus_changed(&mut self, focused: bool) {
        self.notice
            .on_focus_changed(&mut self.host, &self.config, focused);
    }

    /// Drops the session and hands the host back
    pub fn deactivate(self) -> H {
        tracing::debug!("Surround deactivated");
        self.host
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn session(&self) -> &SurroundSession {
        &self.session
    }

    #[must_use]
    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    #[must_use]
    pub fn notice(&self) -> &UpdateNotice {
        &self.notice
    }

    fn surround_with(&mut self) -> CommandOutcome {
        let Some(editor) = self.host.active_editor() else {
            return CommandOutcome::NoActiveEditor;
        };
        let language = Some(editor.language_id.as_str());

        let items = self.session.quick_pick_items(language);
        let Some(picked) = self.host.show_quick_pick(&items) else {
            return CommandOutcome::Dismissed;
        };

        match self.session.choose(&picked, language) {
            Some(item) => self.insert(&item, &editor),
            None => {
                tracing::debug!(label = %picked.label, "Picked label not in catalog");
                CommandOutcome::NotFound
            }
        }
    }

    fn surround_with_key(&mut self, key: &str) -> CommandOutcome {
        let Some(editor) = self.host.active_editor() else {
            return CommandOutcome::NoActiveEditor;
        };
        let Some(item) = self.session.item_for_key(key).cloned() else {
            tracing::debug!(key, "No catalog entry for command");
            return CommandOutcome::NotFound;
        };
        self.session.record_use(&item);
        self.insert(&item, &editor)
    }

    fn insert(&mut self, item: &SurroundItem, editor: &ActiveEditor) -> CommandOutcome {
        let template = match parse_snippet_template(&item.snippet) {
            Ok(template) => template,
            Err(err) => {
                self.host
                    .show_error(&format!("Invalid snippet for \"{}\": {err}", item.label));
                return CommandOutcome::InvalidTemplate(err);
            }
        };

        let resolver = SelectionResolver::new(editor.selected_text.clone())
            .with_file_path(editor.file_path.clone());
        let rendered = render_with_resolver(&template, &resolver);

        match self.host.insert_snippet(&rendered) {
            Ok(()) => CommandOutcome::Inserted {
                key: item.key.clone(),
            },
            Err(err) => {
                tracing::warn!(%err, key = %item.key, "Snippet insertion failed");
                self.host.show_error(&err.to_string());
                CommandOutcome::InsertFailed(err)
            }
        }
    }
}

/// Loads settings, falling back to defaults when the file is unreadable
fn load_settings<H: EditorHost + ?Sized>(host: &mut H, config: &ConfigManager) -> SurroundSettings {
    config.load_settings().unwrap_or_else(|err| {
        tracing::warn!(%err, "Using default settings");
        host.show_error(&format!("Surround: {err}"));
        SurroundSettings::default()
    })
}

/// Builds a session and reports a rejected user map once
fn build_session<H: EditorHost + ?Sized>(host: &mut H, settings: &SurroundSettings) -> SurroundSession {
    let session = SurroundSession::from_settings(settings);
    if let Some(err) = session.diagnostic() {
        host.show_error(&format!(
            "Surround: custom snippets were ignored. {err}"
        ));
    }
    session
}
