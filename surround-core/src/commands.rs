//! Command ids and registration
//!
//! The extension exposes one command that opens the selection list plus one
//! command per catalog entry, namespaced by the entry key.

use std::collections::HashSet;
use std::fmt;

use crate::host::EditorHost;

/// Id of the command that opens the selection list
pub const SURROUND_WITH: &str = "surround.with";

const KEY_PREFIX: &str = "surround.with.";

/// A command the extension knows how to execute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SurroundCommand {
    /// Pick an entry from the list
    With,
    /// Insert the entry with this key directly
    WithKey(String),
}

impl SurroundCommand {
    /// Returns the command id
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::With => SURROUND_WITH.to_string(),
            Self::WithKey(key) => format!("{KEY_PREFIX}{key}"),
        }
    }
}

impl fmt::Display for SurroundCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Maps a command id back to a command
///
/// Returns `None` for ids outside the `surround.with` namespace and for
/// `surround.with.` with an empty key.
#[must_use]
pub fn parse_command(id: &str) -> Option<SurroundCommand> {
    if id == SURROUND_WITH {
        return Some(SurroundCommand::With);
    }
    id.strip_prefix(KEY_PREFIX)
        .filter(|key| !key.is_empty())
        .map(|key| SurroundCommand::WithKey(key.to_string()))
}

/// Tracks which command ids this extension has registered with the host
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    registered: Vec<String>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `surround.with` and one command per key
    ///
    /// Ids the host already knows are skipped, so this can be called again
    /// after every configuration change. Returns the number of ids that were
    /// newly registered.
    pub fn register_all<'k, H>(
        &mut self,
        host: &mut H,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> usize
    where
        H: EditorHost + ?Sized,
    {
        let mut known: HashSet<String> = host.commands().into_iter().collect();
        known.extend(self.registered.iter().cloned());

        let ids = std::iter::once(SurroundCommand::With)
            .chain(keys.into_iter().map(|key| SurroundCommand::WithKey(key.to_string())))
            .map(|command| command.id());

        let mut added = 0;
        for id in ids {
            if !known.insert(id.clone()) {
                continue;
            }
            host.register_command(&id);
            tracing::debug!(command = %id, "Registered command");
            self.registered.push(id);
            added += 1;
        }
        added
    }

    /// Returns the ids registered so far, in registration order
    #[must_use]
    pub fn registered(&self) -> &[String] {
        &self.registered
    }

    /// Returns true if `id` was registered by this registry
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.registered.iter().any(|registered| registered == id)
    }
}
