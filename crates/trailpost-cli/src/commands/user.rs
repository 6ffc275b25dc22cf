use chrono::Utc;
use serde::Serialize;
use trailpost_core::models::User;
use trailpost_core::views::{PostCard, ProfileView};

use crate::commands::common::{format_card_lines, print_json, Context};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ProfileOutput<'a> {
    user: Option<&'a User>,
    member_days: Option<i64>,
    total_posts: usize,
    posts: Vec<PostCard>,
}

pub async fn run_user(
    context: &Context,
    user_id: Option<&str>,
    batches: usize,
    as_json: bool,
) -> Result<(), CliError> {
    let user_id = match user_id {
        Some(id) => id.to_string(),
        None => context.client.current_user().await?.id,
    };

    let mut view = ProfileView::new(
        context.client.clone(),
        &user_id,
        context.config.feed_batch_size,
    )?;
    view.load().await?;
    for _ in 1..batches {
        if view.load_more() == 0 {
            break;
        }
    }

    let now = Utc::now();
    let output = ProfileOutput {
        user: view.user(),
        member_days: view.member_days(now),
        total_posts: view.posts().total(),
        posts: view.posts().cards(),
    };
    if as_json {
        return print_json(&output);
    }

    if let Some(user) = output.user {
        println!("{} (@{})", user.name, user.username);
        if let Some(email) = &user.email {
            println!("Email:   {email}");
        }
        if let Some(days) = output.member_days {
            println!("Member for {days} days");
        }
    }
    println!();
    println!("Posts ({})", output.total_posts);
    for line in format_card_lines(&output.posts, now) {
        println!("{line}");
    }
    Ok(())
}
