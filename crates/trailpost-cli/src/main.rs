//! Trailpost CLI - Browse and post to the Trailpost travel forum
//!
//! Every forum page has a command: the feed, post pages with comments,
//! likes and collections, search, profiles and the post editor.

mod auth;
mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trailpost=info".parse().map_err(|error| {
                    CliError::Config(format!("Invalid log directive: {error}"))
                })?),
        )
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Config { command } => commands::config::run_config(command, profile),
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())
        }
        command => {
            let context = Context::load(profile)?;
            dispatch(command, &context).await
        }
    }
}

async fn dispatch(command: Commands, context: &Context) -> Result<(), CliError> {
    match command {
        Commands::Auth { command } => commands::auth_cmd::run_auth(command, context).await,
        Commands::Feed { batches, json } => commands::feed::run_feed(context, batches, json).await,
        Commands::Search { keyword, json } => {
            commands::search::run_search(context, &keyword.join(" "), json).await
        }
        Commands::Show { post, json } => commands::show::run_show(context, &post, json).await,
        Commands::Comments {
            post,
            page,
            jump,
            json,
        } => commands::comment::run_comments(context, &post, page, jump.as_deref(), json).await,
        Commands::Comment { command } => commands::comment::run_comment(context, command).await,
        Commands::Like { post } => commands::actions::run_like(context, &post).await,
        Commands::Collect { post } => commands::actions::run_collect(context, &post).await,
        Commands::Post { command } => commands::post::run_post(context, command).await,
        Commands::Upload { path } => commands::upload::run_upload(context, &path).await,
        Commands::User { id, batches, json } => {
            commands::user::run_user(context, id.as_deref(), batches, json).await
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}
