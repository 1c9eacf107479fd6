//! `Surround` CLI - Command-line host for `Surround` snippet insertion
//!
//! Drives the surround extension from a terminal: lists the catalog, wraps
//! text with a chosen entry, runs keyed commands and checks the settings.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use surround_core::snippet::parse_snippet_template;
use surround_core::{
    ActiveEditor, CommandOutcome, ConfigManager, EditorHost, HostError, HostResult, NoticeAction,
    QuickPickItem, RenderedSnippet, SurroundCommand, SurroundError, SurroundExtension,
    SurroundItem, SurroundSession,
};
use tracing_subscriber::EnvFilter;

/// `Surround` command-line interface for wrapping text in snippets
#[derive(Parser)]
#[command(name = "surround")]
#[command(author, version, about = "Surround command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration directory (default: the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List catalog entries
    #[command(about = "List the surround entries offered for a language")]
    List {
        /// Output format for the entry list
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,

        /// Only show entries that apply to this language
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Pick an entry and wrap the input with it
    #[command(about = "Wrap text with a surround entry picked by label")]
    With {
        /// Label to pick; prompts on stdin when omitted
        #[arg(short = 'L', long)]
        label: Option<String>,

        /// Description to disambiguate entries sharing a label
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Run the command bound to an entry key
    #[command(about = "Wrap text with the surround entry registered under KEY")]
    Run {
        /// Entry key, e.g. ifStatement
        key: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// List registered command ids
    #[command(about = "List the command ids registered for the catalog")]
    Commands,

    /// Validate the settings file
    #[command(about = "Check the settings file and every snippet body")]
    Check,
}

/// Where the text to surround comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Document language (default: guessed from --file, else plaintext)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Text to surround
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File whose contents are surrounded
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    #[default]
    Table,
    /// Output as JSON
    Json,
    /// Output as CSV
    Csv,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::List { format, language } => cmd_list(config, format, language.as_deref()),
        Commands::With {
            label,
            description,
            input,
        } => cmd_with(config, label, description, &input),
        Commands::Run { key, input } => cmd_run(config, &key, &input),
        Commands::Commands => cmd_commands(config),
        Commands::Check => cmd_check(config),
    };

    if let Err(e) = result {
        if !e.is_reported() {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Creates the config manager for `--config`, expanding `~`
fn config_manager(config: Option<&str>) -> Result<ConfigManager, CliError> {
    match config {
        Some(dir) => {
            let expanded = shellexpand::tilde(dir);
            Ok(ConfigManager::with_config_dir(PathBuf::from(expanded.as_ref())))
        }
        None => Ok(ConfigManager::new().map_err(SurroundError::from)?),
    }
}

/// List entries command handler
fn cmd_list(
    config: Option<&str>,
    format: OutputFormat,
    language: Option<&str>,
) -> Result<(), CliError> {
    let config_manager = config_manager(config)?;
    let settings = config_manager
        .load_settings()
        .map_err(|e| CliError::Config(format!("Failed to load settings: {e}")))?;

    let session = SurroundSession::from_settings(&settings);
    if let Some(diagnostic) = session.diagnostic() {
        eprintln!("Warning: custom snippets were ignored: {diagnostic}");
    }

    let catalog = session.catalog().filter_by_language(language);
    let items: Vec<&SurroundItem> = catalog.iter().collect();

    match format {
        OutputFormat::Table => println!("{}", format_table(&items)),
        OutputFormat::Json => println!("{}", format_json(&items)?),
        OutputFormat::Csv => println!("{}", format_csv(&items)),
    }

    Ok(())
}

/// Pick-and-wrap command handler
fn cmd_with(
    config: Option<&str>,
    label: Option<String>,
    description: Option<String>,
    input: &InputArgs,
) -> Result<(), CliError> {
    let what = label.clone().unwrap_or_default();
    let mut host = TerminalHost::new(Some(read_input(input)?));
    host.pick = label.map(|label| QuickPickItem {
        label,
        description,
        detail: None,
    });

    let mut extension = SurroundExtension::activate(host, config_manager(config)?);
    let outcome = extension.execute_command(&SurroundCommand::With.id());
    outcome_result(outcome, &what)
}

/// Keyed command handler
fn cmd_run(config: Option<&str>, key: &str, input: &InputArgs) -> Result<(), CliError> {
    let host = TerminalHost::new(Some(read_input(input)?));
    let mut extension = SurroundExtension::activate(host, config_manager(config)?);
    let outcome = extension.execute_command(&SurroundCommand::WithKey(key.to_string()).id());
    outcome_result(outcome, key)
}

/// Registered commands handler
fn cmd_commands(config: Option<&str>) -> Result<(), CliError> {
    let extension = SurroundExtension::activate(TerminalHost::new(None), config_manager(config)?);
    for id in extension.commands().registered() {
        println!("{id}");
    }
    Ok(())
}

/// Settings check handler
fn cmd_check(config: Option<&str>) -> Result<(), CliError> {
    let config_manager = config_manager(config)?;
    let path = config_manager.settings_path();
    let settings = config_manager
        .load_settings()
        .map_err(|e| CliError::Rejected(e.to_string()))?;

    let session = SurroundSession::from_settings(&settings);
    let mut problems = Vec::new();
    if let Some(diagnostic) = session.diagnostic() {
        problems.push(format!("custom snippets were ignored: {diagnostic}"));
    }
    for item in session.catalog() {
        if let Err(e) = parse_snippet_template(&item.snippet) {
            problems.push(format!("{}: {e}", item.key));
        }
    }

    println!("Settings: {}", path.display());
    println!("Entries:  {}", session.catalog().len());

    if problems.is_empty() {
        println!("OK");
        Ok(())
    } else {
        Err(CliError::Rejected(problems.join("\n  ")))
    }
}

/// Maps what the extension did to the process result
fn outcome_result(outcome: CommandOutcome, what: &str) -> Result<(), CliError> {
    match outcome {
        CommandOutcome::Inserted { key } => {
            tracing::debug!(%key, "Inserted snippet");
            Ok(())
        }
        CommandOutcome::Dismissed | CommandOutcome::NoActiveEditor => Ok(()),
        CommandOutcome::NotFound => Err(CliError::NotFound(what.to_string())),
        CommandOutcome::InvalidTemplate(e) => Err(CliError::Reported(e.to_string())),
        CommandOutcome::InsertFailed(e) => Err(CliError::Reported(e.to_string())),
        CommandOutcome::UnknownCommand => Err(CliError::NotFound(what.to_string())),
    }
}

/// Builds the editor state from `--text`, `--file` and `--language`
fn read_input(input: &InputArgs) -> Result<ActiveEditor, CliError> {
    let selected_text = match (&input.text, &input.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let language_id = input
        .language
        .clone()
        .or_else(|| input.file.as_deref().and_then(language_for_path))
        .unwrap_or_else(|| "plaintext".to_string());

    let mut editor = ActiveEditor::new(language_id, selected_text);
    editor.file_path.clone_from(&input.file);
    Ok(editor)
}

/// Guesses a language identifier from a file extension
#[must_use]
pub fn language_for_path(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match extension.as_str() {
        "rs" => "rust",
        "py" => "python",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "html" | "htm" => "html",
        "xml" => "xml",
        "vue" => "vue",
        "php" => "php",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "cs" => "csharp",
        "java" => "java",
        "go" => "go",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "css" => "css",
        "scss" => "scss",
        "md" => "markdown",
        "txt" => "plaintext",
        _ => return None,
    };
    Some(language.to_string())
}

// ============================================================================
// Output formatting
// ============================================================================

/// Format entries as a table string
#[must_use]
pub fn format_table(items: &[&SurroundItem]) -> String {
    if items.is_empty() {
        return "No surround entries found.".to_string();
    }

    let mut output = String::new();

    let key_width = items.iter().map(|i| i.key.len()).max().unwrap_or(3).max(3);
    let label_width = items.iter().map(|i| i.label.len()).max().unwrap_or(5).max(5);
    let desc_width = items
        .iter()
        .map(|i| i.description.as_deref().map_or(0, str::len))
        .max()
        .unwrap_or(11)
        .max(11);

    let _ = writeln!(
        output,
        "{:<key_width$}  {:<label_width$}  {:<desc_width$}  LANGUAGES",
        "KEY", "LABEL", "DESCRIPTION"
    );
    let _ = writeln!(
        output,
        "{:-<key_width$}  {:-<label_width$}  {:-<desc_width$}  {:-<9}",
        "", "", "", ""
    );

    for item in items {
        let _ = writeln!(
            output,
            "{:<key_width$}  {:<label_width$}  {:<desc_width$}  {}",
            item.key,
            item.label,
            item.description.as_deref().unwrap_or(""),
            languages(item)
        );
    }

    output.trim_end().to_string()
}

/// Format entries as JSON string
///
/// # Errors
///
/// Returns `CliError::Config` if JSON serialization fails.
pub fn format_json(items: &[&SurroundItem]) -> Result<String, CliError> {
    let output: Vec<ItemOutput> = items.iter().map(|i| (*i).into()).collect();
    serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::Config(format!("Failed to serialize to JSON: {e}")))
}

/// Format entries as CSV string
#[must_use]
pub fn format_csv(items: &[&SurroundItem]) -> String {
    let mut output = String::new();
    output.push_str("key,label,description,languages\n");

    for item in items {
        let _ = writeln!(
            output,
            "{},{},{},{}",
            escape_csv_field(&item.key),
            escape_csv_field(&item.label),
            escape_csv_field(item.description.as_deref().unwrap_or("")),
            escape_csv_field(&languages(item))
        );
    }

    output.trim_end().to_string()
}

fn languages(item: &SurroundItem) -> String {
    item.language_ids
        .as_ref()
        .map_or_else(|| "*".to_string(), |filter| filter.specs().join(","))
}

/// Escape a CSV field if it contains special characters
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Entry output for JSON listing
#[derive(Debug, Serialize)]
struct ItemOutput {
    key: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_ids: Option<Vec<String>>,
}

impl From<&SurroundItem> for ItemOutput {
    fn from(item: &SurroundItem) -> Self {
        Self {
            key: item.key.clone(),
            label: item.label.clone(),
            description: item.description.clone(),
            snippet: item.snippet.clone(),
            language_ids: item
                .language_ids
                .as_ref()
                .map(|filter| filter.specs().to_vec()),
        }
    }
}

// ============================================================================
// Terminal host
// ============================================================================

/// `EditorHost` backed by stdin, stdout and stderr
///
/// Rendered snippets go to stdout, messages to stderr. Without a preset
/// pick the selection list is read as a number from stdin.
#[derive(Debug, Default)]
pub struct TerminalHost {
    editor: Option<ActiveEditor>,
    pick: Option<QuickPickItem>,
    commands: Vec<String>,
}

impl TerminalHost {
    #[must_use]
    pub fn new(editor: Option<ActiveEditor>) -> Self {
        Self {
            editor,
            ..Self::default()
        }
    }
}

impl EditorHost for TerminalHost {
    fn active_editor(&self) -> Option<ActiveEditor> {
        self.editor.clone()
    }

    fn insert_snippet(&mut self, snippet: &RenderedSnippet) -> HostResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", snippet.text)
            .and_then(|()| stdout.flush())
            .map_err(|e| HostError::InsertFailed(e.to_string()))
    }

    fn show_quick_pick(&mut self, items: &[QuickPickItem]) -> Option<QuickPickItem> {
        if let Some(pick) = self.pick.take() {
            return Some(pick);
        }

        let mut stderr = io::stderr();
        let _ = write!(stderr, "{}", format_pick_list(items));
        let _ = stderr.flush();

        read_pick(items, &mut io::stdin().lock())
    }

    fn show_information(&mut self, message: &str, actions: &[NoticeAction]) -> Option<NoticeAction> {
        eprintln!("{message}");
        for action in actions {
            eprintln!("  {}: {}", action.title, action.url);
        }
        None
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn open_external(&mut self, url: &str) -> HostResult<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{url}").map_err(|e| HostError::OpenFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
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

/// Numbered selection list shown before reading a pick
#[must_use]
pub fn format_pick_list(items: &[QuickPickItem]) -> String {
    let mut output = String::new();
    for (index, item) in items.iter().enumerate() {
        let _ = match &item.description {
            Some(description) => writeln!(output, "{:>3}) {}  ({description})", index + 1, item.label),
            None => writeln!(output, "{:>3}) {}", index + 1, item.label),
        };
    }
    output.push_str("Select an entry: ");
    output
}

/// Reads a 1-based choice; anything else dismisses the list
pub fn read_pick(items: &[QuickPickItem], input: &mut impl BufRead) -> Option<QuickPickItem> {
    let mut line = String::new();
    input.read_line(&mut line).ok()?;
    let choice: usize = line.trim().parse().ok()?;
    choice.checked_sub(1).and_then(|index| items.get(index)).cloned()
}

// ============================================================================
// Errors
// ============================================================================

/// Exit codes for CLI operations
pub mod exit_codes {
    /// Success - operation completed successfully
    pub const SUCCESS: i32 = 0;
    /// General error - configuration, lookup or I/O failures
    pub const GENERAL_ERROR: i32 = 1;
    /// Invalid settings - the settings file or a snippet body was rejected
    pub const INVALID_SETTINGS: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No entry for the label or key
    #[error("Surround entry not found: {0}")]
    NotFound(String),

    /// Settings check failed
    #[error("Settings rejected:\n  {0}")]
    Rejected(String),

    /// Already shown to the user through the host
    #[error("{0}")]
    Reported(String),

    /// Core library error
    #[error(transparent)]
    Core(#[from] SurroundError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Rejected(_) => exit_codes::INVALID_SETTINGS,
            Self::Config(_) | Self::NotFound(_) | Self::Reported(_) | Self::Core(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }

    /// Returns true if the message was already printed by the host
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }
}
