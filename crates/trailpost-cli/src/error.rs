use std::io;

use thiserror::Error;
use trailpost_core::ApiError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("No content provided")]
    EmptyContent,
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Comment {comment} is not on page {page}; pass --page with the right page")]
    CommentNotOnPage { comment: String, page: u32 },
    #[error("Page {0} is out of range")]
    PageOutOfRange(String),
    #[error("Confirmation required; pass --yes to run non-interactively")]
    ConfirmationRequired,
    #[error("Aborted")]
    Aborted,
    #[error("The action did not complete; try again")]
    ActionInterrupted,
}
