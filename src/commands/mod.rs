//! Command handlers. Each returns the text to print; `run` prints it.

pub mod auth;
pub mod dashboard;
pub mod monitoring;
pub mod resources;
pub mod settings;

use anyhow::anyhow;
use ga_app::{AdminRuntime, AuthError, BrowserError, MutationError};
use ga_core::{AdminUser, ApiError, ResourceType};

use crate::cli::Commands;
use resources::RowAction;

pub async fn run(runtime: &AdminRuntime, command: Commands) -> anyhow::Result<()> {
    let output = match command {
        Commands::Login { email, password } => auth::login(runtime, &email, password).await?,
        Commands::Logout => auth::logout(runtime).await,
        Commands::Whoami => auth::whoami(runtime).await?,
        Commands::Monitoring(args) => {
            require_session(runtime).await?;
            monitoring::show(runtime, args).await?
        }
        Commands::Dashboard { days, top } => {
            require_session(runtime).await?;
            dashboard::show(runtime, days, top).await?
        }
        Commands::Settings { action } => {
            require_session(runtime).await?;
            settings::run(runtime, action).await?
        }
        Commands::Users { list, action } => {
            require_session(runtime).await?;
            resources::run(runtime, ResourceType::Users, list, action.map(RowAction::from)).await?
        }
        Commands::Jobs { list, action } => {
            require_session(runtime).await?;
            resources::run(runtime, ResourceType::Jobs, list, action.map(RowAction::from)).await?
        }
        Commands::Applications { list, action } => {
            require_session(runtime).await?;
            let action = action.map(RowAction::from);
            resources::run(runtime, ResourceType::Applications, list, action).await?
        }
        Commands::Reports { list, action } => {
            require_session(runtime).await?;
            resources::run(runtime, ResourceType::Reports, list, action.map(RowAction::from)).await?
        }
        Commands::Categories { list, action } => {
            require_session(runtime).await?;
            let action = action.map(RowAction::from);
            resources::run(runtime, ResourceType::Categories, list, action).await?
        }
        Commands::Skills { list, action } => {
            require_session(runtime).await?;
            resources::run(runtime, ResourceType::Skills, list, action.map(RowAction::from)).await?
        }
    };
    print!("{}", output);
    Ok(())
}

/// Resume the stored session or refuse to continue.
pub async fn require_session(runtime: &AdminRuntime) -> anyhow::Result<AdminUser> {
    runtime
        .restore_session()
        .execute()
        .await
        .map_err(auth_failure)?
        .ok_or_else(|| anyhow!("Not signed in. Run `gigadmin login --email <email>` first."))
}

/// Wrap an API error for the terminal. Authorization failures have already
/// signed the console out by the time they get here.
pub fn api_failure(err: ApiError) -> anyhow::Error {
    if err.is_authorization() {
        anyhow!("{}. You have been signed out; run `gigadmin login` again.", err)
    } else {
        anyhow::Error::new(err)
    }
}

pub fn auth_failure(err: AuthError) -> anyhow::Error {
    match err {
        AuthError::Api(api) => api_failure(api),
        other => anyhow::Error::new(other),
    }
}

pub fn mutation_failure(err: MutationError) -> anyhow::Error {
    match err {
        MutationError::Api(api) => api_failure(api),
        other => anyhow::Error::new(other),
    }
}

pub fn browser_failure(err: BrowserError) -> anyhow::Error {
    match err {
        BrowserError::Mutation(inner) => mutation_failure(inner),
        other => anyhow::Error::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_failures_mention_sign_in() {
        let err = api_failure(ApiError::Unauthorized);
        assert!(err.to_string().contains("run `gigadmin login` again"));

        let err = browser_failure(BrowserError::Mutation(MutationError::Api(
            ApiError::Forbidden("nope".into()),
        )));
        assert!(err.to_string().starts_with("forbidden: nope."));
    }

    #[test]
    fn test_other_failures_keep_their_message() {
        let err = api_failure(ApiError::Validation {
            status: 422,
            message: "reason is required".into(),
        });
        assert_eq!(err.to_string(), "reason is required");

        let err = auth_failure(AuthError::AccessDenied);
        assert_eq!(err.to_string(), "Access denied. Admin privileges required.");
    }
}
