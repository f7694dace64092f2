//! Non-interactive account creation.

use anyhow::{Context, Result};
use userdeck_core::config::Config;
use userdeck_core::firebase;

pub async fn run(config: &Config, email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let collaborators = firebase::collaborators(config).context("configure Firebase")?;
    let session = collaborators
        .auth
        .create_account(email, password)
        .await
        .with_context(|| format!("Sign-up error for {email}"))?;

    tracing::info!(user_id = %session.user_id, "Account created");
    println!("Registered {}", session.email);
    Ok(())
}
