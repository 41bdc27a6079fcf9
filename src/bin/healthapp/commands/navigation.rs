// ABOUTME: Navigation command for the healthapp CLI
// ABOUTME: Prints the active tree and its screens
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use healthapp::app::App;

use crate::helpers::display::display_tree;

/// Restore the session and list the active tree
pub async fn show(app: &App) {
    app.start().await;
    match app.current_tree() {
        Some(tree) => display_tree(tree),
        None => println!("Still loading."),
    }
}
