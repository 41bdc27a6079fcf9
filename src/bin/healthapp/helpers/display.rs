// ABOUTME: Output formatting helpers for the healthapp CLI
// ABOUTME: Consistent display of sessions, bootstrap outcomes, and navigation trees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use healthapp::bootstrap::BootstrapOutcome;
use healthapp::models::Session;
use healthapp::navigation::NavTree;
use healthapp::session::SessionState;

/// Display a successful login
pub fn display_login_success(session: &Session) {
    println!("Logged in as {}", describe(session));
}

/// Display how session restore went
pub fn display_bootstrap(outcome: BootstrapOutcome) {
    match outcome {
        BootstrapOutcome::NoToken => println!("No saved login."),
        BootstrapOutcome::Restored => println!("Saved login restored."),
        BootstrapOutcome::Failed { cleared_token } => {
            println!("Saved login could not be restored (see logs).");
            if cleared_token {
                println!("The rejected token was removed.");
            }
        }
    }
}

/// Display the session and the tree selected for it
pub fn display_session(state: &SessionState, tree: Option<NavTree>) {
    println!("{}", "=".repeat(40));
    match state.session() {
        Some(session) => {
            println!("User: {}", describe(session));
            println!(
                "   Id: {}",
                session.profile.id().unwrap_or_else(|| "-".to_owned())
            );
            println!("   Role: {}", session.profile.raw_role().unwrap_or("-"));
            println!("   Tracking: {:?}", session.profile.tracking_mode());
        }
        None => println!("Not logged in."),
    }
    if let Some(tree) = tree {
        println!("Navigation root: {tree}");
    }
    println!("{}", "=".repeat(40));
}

/// Display the tabs of a tree, marking the initial screen
pub fn display_tree(tree: NavTree) {
    println!("{tree}");
    for screen in tree.screens() {
        let marker = if *screen == tree.initial_screen() {
            "*"
        } else {
            " "
        };
        println!(" {marker} {}", screen.title());
    }
}

fn describe(session: &Session) -> String {
    let name = session.profile.display_name();
    let username = session.profile.username().unwrap_or("-");
    if name.is_empty() || name == username {
        username.to_owned()
    } else {
        format!("{name} ({username})")
    }
}
