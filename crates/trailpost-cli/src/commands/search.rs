use chrono::Utc;
use trailpost_core::views::SearchView;

use crate::commands::common::{format_timestamp, print_json, Context};
use crate::error::CliError;

pub async fn run_search(context: &Context, keyword: &str, as_json: bool) -> Result<(), CliError> {
    let mut view = SearchView::new(context.client.clone());
    let hits = view.search(keyword).await?;

    if as_json {
        return print_json(hits);
    }

    if hits.is_empty() {
        println!("No posts match '{}'.", keyword.trim());
        return Ok(());
    }
    let now = Utc::now();
    for hit in hits {
        println!(
            "{}  {}  ({})",
            hit.id,
            hit.title,
            format_timestamp(hit.created_at, now)
        );
        if !hit.excerpt.is_empty() {
            println!("    {}", hit.excerpt);
        }
    }
    Ok(())
}
