use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::Serialize;
use trailpost_core::optimistic::{ActionOutcome, ToggleCounter};
use trailpost_core::views::PostCard;
use trailpost_core::{ApiClient, ApiError, ClientConfig};

use crate::auth::KeyringSessionStore;
use crate::config_profiles::CliProfilesConfig;
use crate::error::CliError;

pub type Client = ApiClient<KeyringSessionStore>;

/// Resolved profile, settings and client for one invocation.
pub struct Context {
    pub profile_name: String,
    pub config: ClientConfig,
    pub client: Client,
}

impl Context {
    pub fn load(explicit_profile: Option<&str>) -> Result<Self, CliError> {
        let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
        let profile_name = profiles.resolve_profile_name(explicit_profile);
        let config = profiles
            .profile(&profile_name)
            .cloned()
            .unwrap_or_default()
            .client_config()?;
        tracing::debug!("Using profile '{}' at {}", profile_name, config.api_base_url);
        let client = ApiClient::new(&config, KeyringSessionStore::new(&profile_name))?;
        Ok(Self {
            profile_name,
            config,
            client,
        })
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_card_lines(cards: &[PostCard], now: DateTime<Utc>) -> Vec<String> {
    cards
        .iter()
        .map(|card| {
            let author = card.author.as_deref().unwrap_or("-");
            let when = format_timestamp(card.created_at, now);
            format!(
                "{:<24}  {:<23}  {:<14}  {:<8}  {} likes  {} views",
                card.id, card.title, author, when, card.likes, card.views
            )
        })
        .collect()
}

pub fn format_timestamp(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    timestamp.map_or_else(|| "-".to_string(), |at| format_relative_time(at, now))
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

/// `6 likes (yours)` style counter text.
pub fn format_counter(counter: ToggleCounter, noun: &str) -> String {
    if counter.active {
        format!("{} {noun} (yours)", counter.count)
    } else {
        format!("{} {noun}", counter.count)
    }
}

/// Maps a finished optimistic action onto the CLI result.
pub fn settle_outcome(outcome: ActionOutcome) -> Result<(), CliError> {
    match outcome {
        ActionOutcome::Settled => Ok(()),
        ActionOutcome::RolledBack(error) => Err(error.into()),
        ActionOutcome::AuthRequired => Err(ApiError::AuthRequired.into()),
        ActionOutcome::NotFound | ActionOutcome::Ignored | ActionOutcome::Abandoned => {
            Err(CliError::ActionInterrupted)
        }
    }
}

/// Text from arguments, else piped stdin, else `$EDITOR`.
pub fn resolve_text(parts: &[String]) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if let Some(content) = capture_editor_input_with_initial("")? {
        return Ok(content);
    }

    Err(CliError::EmptyContent)
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

pub fn capture_editor_input_with_initial(
    initial_content: &str,
) -> Result<Option<String>, CliError> {
    let editor = preferred_editor();
    let temp_file = create_temp_draft_path();
    std::fs::write(&temp_file, initial_content)?;

    let launch_result = launch_editor(&editor, &temp_file);
    let content = std::fs::read_to_string(&temp_file)?;
    let _ = std::fs::remove_file(&temp_file);

    launch_result?;
    Ok(normalize_content(&content))
}

pub fn launch_editor(editor: &str, file_path: &Path) -> Result<(), CliError> {
    match Command::new(editor).arg(file_path).status() {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let mut parts = editor.split_whitespace();
            let Some(program) = parts.next() else {
                return Err(CliError::EditorFailed("empty EDITOR command".into()));
            };

            let mut command = Command::new(program);
            command.args(parts).arg(file_path);

            let status = command.status()?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::EditorFailed(format!(
                    "`{editor}` exited with status {status}"
                )))
            }
        }
        Err(err) => Err(CliError::Io(err)),
    }
}

pub fn preferred_editor() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| default_editor().to_string())
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

fn create_temp_draft_path() -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    env::temp_dir().join(format!("trailpost-draft-{}-{now}.html", std::process::id()))
}

/// Asks before destructive actions. Non-interactive runs need `--yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<(), CliError> {
    if assume_yes {
        return Ok(());
    }
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::ConfirmationRequired);
    }

    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    if is_affirmative(&answer) {
        Ok(())
    } else {
        Err(CliError::Aborted)
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
