use chrono::Utc;
use trailpost_core::views::FeedView;

use crate::commands::common::{format_card_lines, print_json, Context};
use crate::error::CliError;

pub async fn run_feed(context: &Context, batches: usize, as_json: bool) -> Result<(), CliError> {
    let mut feed = FeedView::new(context.client.clone(), context.config.feed_batch_size);
    feed.load().await?;
    for _ in 1..batches {
        if feed.load_more() == 0 {
            break;
        }
    }

    let cards = feed.window().cards();
    if as_json {
        return print_json(&cards);
    }

    if cards.is_empty() {
        println!("No posts yet.");
        return Ok(());
    }
    for line in format_card_lines(&cards, Utc::now()) {
        println!("{line}");
    }
    let window = feed.window();
    if window.has_more() {
        println!(
            "Showing {} of {} posts; pass --batches {} for more.",
            cards.len(),
            window.total(),
            batches.max(1) + 1
        );
    }
    Ok(())
}
