use serde::Serialize;
use trailpost_core::config::normalize_base_url;
use trailpost_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{default_config_path, CliProfilesConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    profile: String,
    active: bool,
    config_path: String,
    api_base_url: String,
    request_timeout_secs: u64,
    comment_page_size: u32,
    feed_batch_size: usize,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            api_base_url,
            timeout_secs,
            comment_page_size,
            no_activate,
        } => run_config_init(
            global_profile,
            api_base_url,
            timeout_secs,
            comment_page_size,
            no_activate,
        ),
        ConfigCommands::Show { json } => run_config_show(global_profile, json),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    comment_page_size: Option<u32>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile_name);
    apply_profile_values(
        &mut config,
        &profile_name,
        api_base_url,
        timeout_secs,
        comment_page_size,
    )?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );
    println!("Run `trailpost auth login --user <name> --password <password>` to sign in.");
    Ok(())
}

/// Merges explicit values into the named profile; unset values keep what is stored.
pub fn apply_profile_values(
    config: &mut CliProfilesConfig,
    profile_name: &str,
    api_base_url: Option<String>,
    timeout_secs: Option<u64>,
    comment_page_size: Option<u32>,
) -> Result<(), CliError> {
    let api_base_url = normalize_text_option(api_base_url)
        .map(|url| normalize_base_url(&url))
        .transpose()?;
    if timeout_secs == Some(0) {
        return Err(CliError::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }
    if comment_page_size == Some(0) {
        return Err(CliError::Config(
            "comment_page_size must be greater than zero".to_string(),
        ));
    }

    let profile = config.profile_mut_or_default(profile_name);
    if let Some(url) = api_base_url {
        profile.api_base_url = Some(url);
    }
    if let Some(secs) = timeout_secs {
        profile.request_timeout_secs = Some(secs);
    }
    if let Some(size) = comment_page_size {
        profile.comment_page_size = Some(size);
    }
    Ok(())
}

fn run_config_show(global_profile: Option<&str>, as_json: bool) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(global_profile);
    let effective = config
        .profile(&profile_name)
        .cloned()
        .unwrap_or_default()
        .client_config()?;
    let view = EffectiveConfig {
        active: config.active_profile.as_deref() == Some(profile_name.as_str()),
        profile: profile_name,
        config_path: default_config_path()
            .map_err(CliError::Config)?
            .display()
            .to_string(),
        api_base_url: effective.api_base_url,
        request_timeout_secs: effective.request_timeout.as_secs(),
        comment_page_size: effective.comment_page_size,
        feed_batch_size: effective.feed_batch_size,
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let marker = if view.active { " (active)" } else { "" };
        println!("Profile:       {}{marker}", view.profile);
        println!("Config file:   {}", view.config_path);
        println!("API base URL:  {}", view.api_base_url);
        println!("Timeout:       {}s", view.request_timeout_secs);
        println!("Comment page:  {}", view.comment_page_size);
        println!("Feed batch:    {}", view.feed_batch_size);
    }
    Ok(())
}
