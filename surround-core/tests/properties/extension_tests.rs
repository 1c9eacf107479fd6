//! Tests for the extension glue driven through a recording host

use proptest::prelude::*;
use surround_core::{
    ActiveEditor, CommandOutcome, ConfigManager, EditorHost, HostResult, NoticeAction,
    QuickPickItem, RenderedSnippet, SurroundExtension, SurroundItemConfig, SurroundSettings,
    SurroundState, CURRENT_VERSION,
};
use tempfile::TempDir;

/// Host that answers picks from a script and records everything else
#[derive(Debug, Default)]
struct ScriptedHost {
    editor: Option<ActiveEditor>,
    answers: Vec<String>,
    shown: Vec<Vec<String>>,
    inserted: Vec<String>,
    errors: Vec<String>,
    commands: Vec<String>,
}

impl EditorHost for ScriptedHost {
    fn active_editor(&self) -> Option<ActiveEditor> {
        self.editor.clone()
    }

    fn insert_snippet(&mut self, snippet: &RenderedSnippet) -> HostResult<()> {
        self.inserted.push(snippet.text.clone());
        Ok(())
    }

    fn show_quick_pick(&mut self, items: &[QuickPickItem]) -> Option<QuickPickItem> {
        self.shown
            .push(items.iter().map(|item| item.label.clone()).collect());
        if self.answers.is_empty() {
            return None;
        }
        let label = self.answers.remove(0);
        items.iter().find(|item| item.label == label).cloned()
    }

    fn show_information(&mut self, _message: &str, _actions: &[NoticeAction]) -> Option<NoticeAction> {
        None
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn open_external(&mut self, _url: &str) -> HostResult<()> {
        Ok(())
    }

    fn commands(&self) -> Vec<String> {
        self.commands.clone()
    }

    fn register_command(&mut self, id: &str) {
        self.commands.push(id.to_string());
    }

    fn is_window_focused(&self) -> bool {
        true
    }
}

fn setup(labels: &[String]) -> (ConfigManager, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());

    let mut settings = SurroundSettings {
        show_only_user_defined_snippets: true,
        ..SurroundSettings::default()
    };
    for label in labels {
        settings.custom.insert(
            label.to_lowercase(),
            SurroundItemConfig::new(label.clone(), format!("{label}($TM_SELECTED_TEXT)")),
        );
    }
    manager.save_settings(&settings).unwrap();
    manager
        .save_state(&SurroundState {
            last_seen_version: Some(CURRENT_VERSION.to_string()),
            notified_at: None,
        })
        .unwrap();

    (manager, temp_dir)
}

fn arb_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Z][a-z]{0,4}", 1..6)
        .prop_map(|labels| labels.into_iter().collect())
        .prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// After each pick the next list starts with the picked label and
    /// still offers every entry
    #[test]
    fn picks_move_to_front(labels in arb_labels(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..6)) {
        let (manager, _temp) = setup(&labels);
        let answers: Vec<String> = picks.iter().map(|pick| pick.get(&labels).clone()).collect();
        let host = ScriptedHost {
            editor: Some(ActiveEditor::new("rust", "x")),
            answers: answers.clone(),
            ..ScriptedHost::default()
        };
        let mut extension = SurroundExtension::activate(host, manager);

        for answer in &answers {
            let outcome = extension.execute_command("surround.with");
            let inserted = matches!(outcome, CommandOutcome::Inserted { .. });
            prop_assert!(inserted);
        }
        extension.execute_command("surround.with");

        let host = extension.deactivate();
        for (shown, answer) in host.shown[1..].iter().zip(&answers) {
            prop_assert_eq!(&shown[0], answer);
            let mut sorted = shown.clone();
            sorted.sort();
            let mut expected = labels.clone();
            expected.sort();
            prop_assert_eq!(sorted, expected);
        }
        let inserted: Vec<String> = answers.iter().map(|label| format!("{label}(x)")).collect();
        prop_assert_eq!(host.inserted, inserted);
    }
}

#[test]
fn keyed_commands_registered_for_every_entry() {
    let labels = vec!["Alpha".to_string(), "Beta".to_string()];
    let (manager, _temp) = setup(&labels);

    let extension = SurroundExtension::activate(ScriptedHost::default(), manager);

    assert_eq!(
        extension.host().commands,
        vec!["surround.with", "surround.with.alpha", "surround.with.beta"]
    );
}

#[test]
fn dismissed_pick_leaves_document_alone() {
    let (manager, _temp) = setup(&["Alpha".to_string()]);
    let host = ScriptedHost {
        editor: Some(ActiveEditor::new("rust", "x")),
        ..ScriptedHost::default()
    };
    let mut extension = SurroundExtension::activate(host, manager);

    assert_eq!(
        extension.execute_command("surround.with"),
        CommandOutcome::Dismissed
    );
    assert!(extension.host().inserted.is_empty());
    assert!(extension.host().errors.is_empty());
}

#[test]
fn builtin_if_statement_wraps_selection() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());
    manager
        .save_state(&SurroundState {
            last_seen_version: Some(CURRENT_VERSION.to_string()),
            notified_at: None,
        })
        .unwrap();
    let host = ScriptedHost {
        editor: Some(ActiveEditor::new("javascript", "run();")),
        ..ScriptedHost::default()
    };
    let mut extension = SurroundExtension::activate(host, manager);

    let outcome = extension.execute_command("surround.with.ifStatement");

    assert_eq!(
        outcome,
        CommandOutcome::Inserted {
            key: "ifStatement".to_string()
        }
    );
    assert!(extension.host().inserted[0].contains("run();"));
    assert!(extension.host().inserted[0].starts_with("if ("));
}
