// ABOUTME: Dashboard command for the healthapp CLI
// ABOUTME: Restores the session and prints the home screen
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::Local;
use healthapp::app::App;

/// Render the home screen of the logged-in user
pub async fn show(app: &App) -> Result<()> {
    app.start().await;
    let text = app.render_dashboard(Local::now().date_naive()).await?;
    print!("{text}");
    Ok(())
}
