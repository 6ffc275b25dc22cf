use std::path::Path;

use trailpost_core::forms::PostDraft;
use trailpost_core::views::{CoverUpload, PostEditor};

use crate::cli::PostCommands;
use crate::commands::common::{
    capture_editor_input_with_initial, confirm, normalize_content, read_piped_stdin, Context,
};
use crate::commands::upload::read_upload;
use crate::error::CliError;

pub async fn run_post(context: &Context, command: PostCommands) -> Result<(), CliError> {
    let editor = PostEditor::new(context.client.clone());
    match command {
        PostCommands::Create {
            title,
            content,
            cover,
        } => {
            let content = match content.as_deref().and_then(normalize_content) {
                Some(content) => content,
                None => match read_piped_stdin()? {
                    Some(content) => content,
                    None => capture_editor_input_with_initial("")?.ok_or(CliError::EmptyContent)?,
                },
            };
            let draft = PostDraft {
                title,
                content,
                cover_image: None,
            };
            let post_id = editor.create(draft, load_cover(cover.as_deref())?).await?;
            println!("Created post {post_id}");
            Ok(())
        }
        PostCommands::Edit {
            post,
            title,
            content,
            cover,
        } => {
            let mut draft = editor.open(&post).await?;
            if let Some(title) = title {
                draft.title = title;
            }
            draft.content = match content.as_deref().and_then(normalize_content) {
                Some(content) => content,
                None => match read_piped_stdin()? {
                    Some(content) => content,
                    None => capture_editor_input_with_initial(&draft.content)?
                        .ok_or(CliError::EmptyContent)?,
                },
            };
            editor
                .save(&post, draft, load_cover(cover.as_deref())?)
                .await?;
            println!("Saved post {}", post.trim());
            Ok(())
        }
        PostCommands::Delete { post, yes } => {
            confirm(&format!("Delete post {}?", post.trim()), yes)?;
            editor.delete(&post).await?;
            println!("Deleted post {}", post.trim());
            Ok(())
        }
    }
}

fn load_cover(path: Option<&Path>) -> Result<Option<CoverUpload>, CliError> {
    path.map(|path| {
        let (file_name, bytes) = read_upload(path)?;
        Ok(CoverUpload { file_name, bytes })
    })
    .transpose()
}
