// ABOUTME: Session commands for the healthapp CLI
// ABOUTME: Login, logout, and whoami
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Result};
use healthapp::app::App;
use healthapp::login::LoginForm;
use tracing::info;

use crate::helpers::display::{display_bootstrap, display_login_success, display_session};

/// Submit the login form
pub async fn login(app: &App, username: String, password: String) -> Result<()> {
    let form = LoginForm { username, password };
    match app.login(&form).await {
        Ok(session) => {
            display_login_success(&session);
            Ok(())
        }
        Err(error) => bail!(error.user_message()),
    }
}

/// Log out; the session is cleared even if the token file cannot be updated
pub async fn logout(app: &App) -> Result<()> {
    app.logout().await?;
    info!("Logged out");
    println!("Logged out.");
    Ok(())
}

/// Restore the session and print it
pub async fn whoami(app: &App) {
    let outcome = app.start().await;
    display_bootstrap(outcome);
    display_session(&app.session_state(), app.current_tree());
}
