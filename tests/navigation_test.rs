// ABOUTME: Integration tests for role-based navigation selection
// ABOUTME: Verifies the tree chosen for each principal and the route stack resets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{expert_session, init_test_logging, user_session};
use healthapp::models::{BearerToken, Session, UserProfile};
use healthapp::navigation::{NavTree, Navigator, RouteStack, Screen};
use healthapp::session::{Principal, SessionState};
use serde_json::{json, Value};

fn session_with_role(role: Value) -> Session {
    Session::new(
        UserProfile::from_value(json!({"id": 1, "role": role})),
        BearerToken::new("T"),
    )
}

#[test]
fn test_role_user_selects_standard_tree() {
    let state = SessionState::Authenticated(user_session(1));
    assert_eq!(NavTree::for_state(&state), NavTree::StandardUser);
    assert_eq!(NavTree::StandardUser.initial_screen(), Screen::Home);
    assert_eq!(
        NavTree::StandardUser.screens(),
        &[
            Screen::Home,
            Screen::Tracking,
            Screen::Plan,
            Screen::Journal,
            Screen::Profile
        ]
    );
}

#[test]
fn test_role_expert_selects_expert_tree() {
    let state = SessionState::Authenticated(expert_session(2));
    assert_eq!(NavTree::for_state(&state), NavTree::Expert);
    assert_eq!(
        NavTree::Expert.screens(),
        &[Screen::Home, Screen::ClientList, Screen::Chat, Screen::Profile]
    );
}

#[test]
fn test_absent_or_unknown_role_selects_login_tree() {
    init_test_logging();
    assert_eq!(
        NavTree::for_state(&SessionState::Unauthenticated),
        NavTree::Unauthenticated
    );

    for role in [json!("admin"), json!("USER"), json!(""), json!(null), json!(3)] {
        let session = session_with_role(role);
        assert_eq!(
            NavTree::select(&Principal::from_session(Some(&session))),
            NavTree::Unauthenticated
        );
    }

    let no_role = Session::new(UserProfile::from_value(json!({"id": 1})), BearerToken::new("T"));
    assert_eq!(
        NavTree::for_state(&SessionState::Authenticated(no_role)),
        NavTree::Unauthenticated
    );
}

#[test]
fn test_trees_are_mutually_exclusive() {
    let trees = [
        NavTree::for_state(&SessionState::Unauthenticated),
        NavTree::for_state(&SessionState::Authenticated(user_session(1))),
        NavTree::for_state(&SessionState::Authenticated(expert_session(2))),
    ];
    assert_eq!(
        trees,
        [
            NavTree::Unauthenticated,
            NavTree::StandardUser,
            NavTree::Expert
        ]
    );
    assert_eq!(
        trees.map(NavTree::root_route),
        ["Login", "UserMain", "ExpertMain"]
    );
}

#[test]
fn test_route_stack_follows_resets() {
    let stack = RouteStack::default();
    assert_eq!(stack.tree(), NavTree::Unauthenticated);

    stack.reset(NavTree::StandardUser);
    assert!(stack.push(Screen::Plan));
    assert_eq!(stack.current(), Screen::Plan);

    stack.reset(NavTree::Unauthenticated);
    assert_eq!(stack.current(), Screen::Login);
    assert_eq!(stack.depth(), 1);
}
