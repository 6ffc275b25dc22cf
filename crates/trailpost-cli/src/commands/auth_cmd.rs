use trailpost_core::forms::{LoginForm, RegisterForm};
use trailpost_core::{ApiError, SessionPersistence};

use crate::cli::AuthCommands;
use crate::commands::common::Context;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, context: &Context) -> Result<(), CliError> {
    let profile_name = &context.profile_name;
    match command {
        AuthCommands::Login { user, password } => {
            let user = context
                .client
                .login(&LoginForm::new(user, password))
                .await?;
            println!("Signed in profile '{profile_name}' as {}", user.username);
            Ok(())
        }
        AuthCommands::Register {
            name,
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                username,
                email,
                password,
                confirm_password,
            };
            let user = context.client.register(&form).await?;
            println!(
                "Registered {} and signed in profile '{profile_name}'",
                user.username
            );
            Ok(())
        }
        AuthCommands::Status => {
            if !context.client.is_signed_in()? {
                println!("Profile '{profile_name}' is not signed in.");
                return Ok(());
            }
            match context.client.current_user().await {
                Ok(user) => {
                    println!(
                        "Profile '{profile_name}' is signed in as {} ({})",
                        user.username, user.id
                    );
                    Ok(())
                }
                Err(ApiError::Unauthorized(message)) => {
                    println!(
                        "Profile '{profile_name}' has a stored session the server rejected ({message}). Run `trailpost auth login`."
                    );
                    Ok(())
                }
                Err(error) => Err(error.into()),
            }
        }
        AuthCommands::Logout => {
            let had_session = context.client.session_store().load_session()?.is_some();
            context.client.logout()?;
            if had_session {
                println!("Signed out profile '{profile_name}'");
            } else {
                println!("Profile '{profile_name}' was not signed in.");
            }
            Ok(())
        }
    }
}
