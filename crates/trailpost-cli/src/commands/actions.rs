use trailpost_core::lifetime::ViewLifetime;
use trailpost_core::views::{ActionsState, PostActionsView};

use crate::auth::KeyringSessionStore;
use crate::commands::common::{format_counter, settle_outcome, Context};
use crate::error::CliError;

pub async fn run_like(context: &Context, post_id: &str) -> Result<(), CliError> {
    let view = load_actions(context, post_id).await?;
    settle_outcome(view.toggle_like().await?)?;
    let state = view.state();
    let verb = if state.like.active { "Liked" } else { "Unliked" };
    println!("{verb} post {}", view.post_id());
    print_counters(&state);
    Ok(())
}

pub async fn run_collect(context: &Context, post_id: &str) -> Result<(), CliError> {
    let view = load_actions(context, post_id).await?;
    settle_outcome(view.toggle_collect().await?)?;
    let state = view.state();
    let verb = if state.collect.active {
        "Collected"
    } else {
        "Removed from collection"
    };
    println!("{verb}: post {}", view.post_id());
    print_counters(&state);
    Ok(())
}

async fn load_actions(
    context: &Context,
    post_id: &str,
) -> Result<PostActionsView<KeyringSessionStore>, CliError> {
    let view = PostActionsView::new(context.client.clone(), post_id.trim(), ViewLifetime::new());
    view.load().await?;
    Ok(view)
}

pub fn print_counters(state: &ActionsState) {
    println!(
        "{}, {}, {} views",
        format_counter(state.like, "likes"),
        format_counter(state.collect, "collections"),
        state.views
    );
}
