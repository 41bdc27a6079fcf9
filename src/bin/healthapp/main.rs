// ABOUTME: healthapp CLI - drives the client core from a terminal
// ABOUTME: Logs in and out, shows the restored session, the navigation tree, and the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Log in (application credentials come from HEALTHAPP_CLIENT_ID / HEALTHAPP_CLIENT_SECRET)
//! healthapp login --username lan --password secret
//!
//! # Show who is logged in after restoring the persisted token
//! healthapp whoami
//!
//! # Render the home screen of a standard user
//! healthapp dashboard
//!
//! # List the tabs of the active navigation tree
//! healthapp nav
//!
//! # Log out and remove the persisted token
//! healthapp logout
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use healthapp::app::App;
use healthapp::config::ClientConfig;
use healthapp::logging::LoggingConfig;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "healthapp",
    version,
    about = "Health tracking client",
    long_about = "Command-line front end of the health tracking client: login, session restore, \
                  navigation, and the user dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Token file override (implies file storage)
    #[arg(long, global = true)]
    token_path: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Log in with username and password
    Login {
        /// Account username
        #[arg(long)]
        username: String,

        /// Account password
        #[arg(long, env = "HEALTHAPP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and remove the persisted token
    Logout,

    /// Restore the session and show the logged-in user
    Whoami,

    /// Restore the session and render the home screen
    Dashboard,

    /// Restore the session and list the active navigation tree
    Nav,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(token_path) = cli.token_path {
        config = config.with_token_path(token_path);
    }
    debug!(base_url = %config.base_url, "Starting healthapp CLI");

    let app = App::new(config)?;

    match cli.command {
        Command::Login { username, password } => {
            commands::session::login(&app, username, password).await?;
        }
        Command::Logout => commands::session::logout(&app).await?,
        Command::Whoami => commands::session::whoami(&app).await,
        Command::Dashboard => commands::dashboard::show(&app).await?,
        Command::Nav => commands::navigation::show(&app).await,
    }

    Ok(())
}
