use chrono::{DateTime, Utc};
use trailpost_core::lifetime::ViewLifetime;
use trailpost_core::optimistic::ActionOutcome;
use trailpost_core::views::{CommentThread, ThreadState};

use crate::auth::KeyringSessionStore;
use crate::cli::CommentCommands;
use crate::commands::common::{
    confirm, format_counter, format_timestamp, print_json, resolve_text, settle_outcome, Context,
};
use crate::error::CliError;

fn open_thread(context: &Context, post_id: &str) -> CommentThread<KeyringSessionStore> {
    CommentThread::new(
        context.client.clone(),
        post_id.trim(),
        context.config.comment_page_size,
        ViewLifetime::new(),
    )
}

/// Opens the thread on `page`, loading page 1 first so the page count is known.
async fn open_thread_at(
    context: &Context,
    post_id: &str,
    page: u32,
) -> Result<CommentThread<KeyringSessionStore>, CliError> {
    let thread = open_thread(context, post_id);
    thread.load_page(1).await?;
    if page != 1 && !thread.jump(&page.to_string()).await? {
        return Err(CliError::PageOutOfRange(page.to_string()));
    }
    Ok(thread)
}

pub async fn run_comments(
    context: &Context,
    post_id: &str,
    page: Option<u32>,
    jump: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let thread = if let Some(input) = jump {
        let thread = open_thread(context, post_id);
        thread.load_page(1).await?;
        if !thread.jump(input).await? {
            return Err(CliError::PageOutOfRange(input.trim().to_string()));
        }
        thread
    } else {
        open_thread_at(context, post_id, page.unwrap_or(1)).await?
    };

    let state = thread.state();
    if as_json {
        return print_json(&state);
    }
    print_thread(&state, Utc::now());
    Ok(())
}

pub async fn run_comment(context: &Context, command: CommentCommands) -> Result<(), CliError> {
    match command {
        CommentCommands::Add { post, content } => {
            let text = resolve_text(&content)?;
            let thread = open_thread(context, &post);
            let created = thread.submit(&text).await?.ok_or(CliError::EmptyContent)?;
            println!("Added comment {} to post {}", created.id, post.trim());
            Ok(())
        }
        CommentCommands::Like {
            post,
            comment,
            page,
        } => {
            let thread = open_thread_at(context, &post, page).await?;
            let outcome = thread.like(comment.trim()).await?;
            report_vote(&thread, comment.trim(), page, outcome)
        }
        CommentCommands::Dislike {
            post,
            comment,
            page,
        } => {
            let thread = open_thread_at(context, &post, page).await?;
            let outcome = thread.dislike(comment.trim()).await?;
            report_vote(&thread, comment.trim(), page, outcome)
        }
        CommentCommands::Delete {
            post,
            comment,
            page,
            yes,
        } => {
            let thread = open_thread_at(context, &post, page).await?;
            let comment = comment.trim();
            let found = thread
                .state()
                .comments
                .iter()
                .any(|existing| existing.id == comment);
            if !found {
                return Err(CliError::CommentNotOnPage {
                    comment: comment.to_string(),
                    page,
                });
            }
            confirm(&format!("Delete comment {comment}?"), yes)?;
            thread.delete(comment).await?;
            println!("Deleted comment {comment}");
            Ok(())
        }
    }
}

fn report_vote(
    thread: &CommentThread<KeyringSessionStore>,
    comment_id: &str,
    page: u32,
    outcome: ActionOutcome,
) -> Result<(), CliError> {
    if matches!(outcome, ActionOutcome::NotFound) {
        return Err(CliError::CommentNotOnPage {
            comment: comment_id.to_string(),
            page,
        });
    }
    settle_outcome(outcome)?;
    if let Some(comment) = thread
        .state()
        .comments
        .iter()
        .find(|comment| comment.id == comment_id)
    {
        println!(
            "Comment {comment_id}: {}, {}",
            format_counter(comment.like_counter(), "likes"),
            format_counter(comment.dislike_counter(), "dislikes")
        );
    }
    Ok(())
}

pub fn print_thread(state: &ThreadState, now: DateTime<Utc>) {
    let cursor = state.cursor;
    println!(
        "Comments (page {}/{})",
        cursor.current_page, cursor.total_pages
    );
    if state.comments.is_empty() {
        println!("  No comments yet.");
    }
    for comment in &state.comments {
        let author = comment
            .user
            .as_ref()
            .map_or("-", |user| user.username.as_str());
        let badge = if state.is_by_post_author(comment) {
            " [author]"
        } else {
            ""
        };
        println!(
            "  [{}] {author}{badge}, {}, +{} / -{}",
            comment.id,
            format_timestamp(comment.created_at, now),
            comment.likes,
            comment.dislikes
        );
        println!("      {}", comment.content);
    }

    let mut hints = Vec::new();
    if let Some(prev) = cursor.prev_target() {
        hints.push(format!("prev: --page {prev}"));
    }
    if let Some(next) = cursor.next_target() {
        hints.push(format!("next: --page {next}"));
    }
    if !hints.is_empty() {
        println!("  ({})", hints.join(", "));
    }
}
