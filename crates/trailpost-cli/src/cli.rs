use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "trailpost")]
#[command(about = "Browse and post to the Trailpost travel forum")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name (backend URL and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the newest posts
    Feed {
        /// Number of 12-post batches to show
        #[arg(short, long, default_value = "1")]
        batches: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search posts by keyword
    Search {
        /// Search keyword
        #[arg(required = true)]
        keyword: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a post with its contents, counters, comments and related posts
    #[command(alias = "view")]
    Show {
        /// Post ID
        post: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List one page of comments on a post
    Comments {
        /// Post ID
        post: String,
        /// Page number (1-based)
        #[arg(short, long, conflicts_with = "jump")]
        page: Option<u32>,
        /// Free-form page input; non-digits are ignored
        #[arg(long, value_name = "TEXT")]
        jump: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add, vote on or delete comments
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Like or unlike a post
    Like {
        /// Post ID
        post: String,
    },
    /// Collect or uncollect a post
    Collect {
        /// Post ID
        post: String,
    },
    /// Create, edit or delete your posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },
    /// Upload an image and print its URL
    Upload {
        /// Image file
        path: PathBuf,
    },
    /// Show a member profile and their posts
    User {
        /// User ID (defaults to the signed-in user)
        id: Option<String>,
        /// Number of 12-post batches to show
        #[arg(short, long, default_value = "1")]
        batches: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Comment on a post (text from args, stdin, or $EDITOR)
    Add {
        /// Post ID
        post: String,
        /// Comment text
        content: Vec<String>,
    },
    /// Like or unlike a comment
    Like {
        /// Post ID
        post: String,
        /// Comment ID
        comment: String,
        /// Comment page the comment is on
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Dislike or un-dislike a comment
    Dislike {
        /// Post ID
        post: String,
        /// Comment ID
        comment: String,
        /// Comment page the comment is on
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Delete one of your comments
    Delete {
        /// Post ID
        post: String,
        /// Comment ID
        comment: String,
        /// Comment page the comment is on
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PostCommands {
    /// Publish a new post
    Create {
        /// Post title
        #[arg(long)]
        title: String,
        /// HTML content (stdin or $EDITOR when omitted)
        #[arg(long)]
        content: Option<String>,
        /// Cover image to upload
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,
    },
    /// Edit one of your posts
    Edit {
        /// Post ID
        post: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New HTML content (opens $EDITOR with the current content when omitted)
        #[arg(long)]
        content: Option<String>,
        /// New cover image to upload
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,
    },
    /// Delete one of your posts
    Delete {
        /// Post ID
        post: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Forum backend URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Comments per page
        #[arg(long, value_name = "N")]
        comment_page_size: Option<u32>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in and store the session in the keychain
    Login {
        /// Username or email
        #[arg(long, value_name = "USER")]
        user: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        /// Must match --password
        #[arg(long, value_name = "PASSWORD")]
        confirm_password: String,
    },
    /// Show who the profile is signed in as
    Status,
    /// Forget the stored session
    Logout,
}
