use chrono::Utc;
use serde::Serialize;
use trailpost_core::models::{PostDetail, Recommendation};
use trailpost_core::toc::TocEntry;
use trailpost_core::util::strip_html;
use trailpost_core::views::{ActionsState, PostDetailView, ThreadState};

use crate::commands::actions::print_counters;
use crate::commands::comment::print_thread;
use crate::commands::common::{format_timestamp, print_json, Context};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PostPage<'a> {
    detail: Option<&'a PostDetail>,
    toc: &'a [TocEntry],
    actions: ActionsState,
    comments: ThreadState,
    recommendations: &'a [Recommendation],
    warnings: &'a [String],
}

pub async fn run_show(context: &Context, post_id: &str, as_json: bool) -> Result<(), CliError> {
    let mut view = PostDetailView::new(
        context.client.clone(),
        post_id.trim(),
        context.config.comment_page_size,
    );
    view.load().await?;

    let page = PostPage {
        detail: view.detail(),
        toc: &view.toc().entries,
        actions: view.actions().state(),
        comments: view.comments().state(),
        recommendations: view.recommendations(),
        warnings: view.warnings(),
    };
    if as_json {
        return print_json(&page);
    }

    let now = Utc::now();
    if let Some(detail) = page.detail {
        let post = &detail.post;
        println!("{}", post.title);
        let author = post
            .author
            .as_ref()
            .map(|author| author.username().unwrap_or_else(|| author.id()))
            .unwrap_or("-");
        println!("by {author}, {}", format_timestamp(post.created_at, now));
        print_counters(&page.actions);
        if detail.permission {
            println!("You can edit this post: trailpost post edit {}", post.id);
        }
        if let Some(cover) = &post.img_path {
            println!("Cover: {cover}");
        }

        if !page.toc.is_empty() {
            println!();
            println!("Contents");
            for entry in page.toc {
                let indent = "  ".repeat(usize::from(entry.level));
                println!("{indent}{} (#{})", entry.text, entry.anchor);
            }
        }

        println!();
        for paragraph in body_paragraphs(&view.toc().html) {
            println!("{paragraph}");
        }
    }

    println!();
    print_thread(&page.comments, now);

    if !page.recommendations.is_empty() {
        println!();
        println!("Related posts");
        for related in page.recommendations {
            println!(
                "  {}  {}  (similarity {:.2})",
                related.id, related.title, related.similarity
            );
        }
    }

    for warning in page.warnings {
        eprintln!("Warning: {warning}");
    }
    Ok(())
}

/// Plain-text paragraphs of a rich-text body.
pub fn body_paragraphs(html: &str) -> Vec<String> {
    let mut with_breaks = html.to_string();
    for block_end in [
        "</p>", "</h1>", "</h2>", "</h3>", "</h4>", "</li>", "</div>", "<br>", "<br/>", "<br />",
    ] {
        with_breaks = with_breaks.replace(block_end, &format!("{block_end}\n"));
    }
    strip_html(&with_breaks)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}
