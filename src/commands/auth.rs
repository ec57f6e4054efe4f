use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info_span;
use tracing::Instrument;

use super::auth_failure;
use ga_app::AdminRuntime;
use ga_core::AdminUser;

fn describe(admin: &AdminUser) -> String {
    format!("{} <{}> ({})", admin.display_name(), admin.email, admin.role)
}

async fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login(
    runtime: &AdminRuntime,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<String> {
    let password = match password {
        Some(p) => p,
        None => read_password().await?,
    };
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let admin = runtime
        .login()
        .execute(email.trim(), &password)
        .instrument(info_span!("command.login"))
        .await
        .map_err(auth_failure)?;
    Ok(format!("Signed in as {}\n", describe(&admin)))
}

pub async fn logout(runtime: &AdminRuntime) -> String {
    // Load the stored session first so the backend can revoke its refresh token.
    if let Err(err) = runtime.restore_session().execute().await {
        tracing::debug!(error = %err, "no session to restore before logout");
    }
    if runtime.logout().execute().await {
        "Signed out\n".to_string()
    } else {
        "Not signed in\n".to_string()
    }
}

pub async fn whoami(runtime: &AdminRuntime) -> anyhow::Result<String> {
    let admin = runtime
        .restore_session()
        .execute()
        .await
        .map_err(auth_failure)?;
    Ok(match admin {
        Some(admin) => format!("{}\n", describe(&admin)),
        None => "Not signed in\n".to_string(),
    })
}
