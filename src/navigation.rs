// ABOUTME: Role-based selection of the active navigation tree
// ABOUTME: Screens, tab layouts, the selector over principals, and navigators that reset to a root
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Navigation
//!
//! The active tree is never stored. It is recomputed from the session every
//! time the session changes, so it can not drift out of sync with the role.

use std::fmt::{self, Display, Formatter};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::session::{Principal, SessionState};

/// Screens reachable from a navigation root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Username/password form
    Login,
    /// Dashboard
    Home,
    /// Daily health tracking
    Tracking,
    /// Workout and meal plans
    Plan,
    /// Health journal
    Journal,
    /// Own profile
    Profile,
    /// Users connected to the expert
    ClientList,
    /// Conversations
    Chat,
}

impl Screen {
    /// Route name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Home",
            Self::Tracking => "Tracking",
            Self::Plan => "Plan",
            Self::Journal => "Journal",
            Self::Profile => "Profile",
            Self::ClientList => "ClientList",
            Self::Chat => "Chat",
        }
    }

    /// Tab label
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Home",
            Self::Tracking => "Tracking",
            Self::Plan => "Plan",
            Self::Journal => "Journal",
            Self::Profile => "Profile",
            Self::ClientList => "Client List",
            Self::Chat => "Chat",
        }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One of the three mutually exclusive navigation trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTree {
    /// Login screen only
    Unauthenticated,
    /// Tabs for a plain user
    StandardUser,
    /// Tabs for an expert
    Expert,
}

const LOGIN_SCREENS: &[Screen] = &[Screen::Login];
const USER_TABS: &[Screen] = &[
    Screen::Home,
    Screen::Tracking,
    Screen::Plan,
    Screen::Journal,
    Screen::Profile,
];
const EXPERT_TABS: &[Screen] = &[
    Screen::Home,
    Screen::ClientList,
    Screen::Chat,
    Screen::Profile,
];

impl NavTree {
    /// Select the tree for a principal
    #[must_use]
    pub const fn select(principal: &Principal<'_>) -> Self {
        match principal {
            Principal::Anonymous => Self::Unauthenticated,
            Principal::StandardUser(_) => Self::StandardUser,
            Principal::Expert(_) => Self::Expert,
        }
    }

    /// Select the tree for a session state
    #[must_use]
    pub fn for_state(state: &SessionState) -> Self {
        Self::select(&state.principal())
    }

    /// Name of the root route
    #[must_use]
    pub const fn root_route(self) -> &'static str {
        match self {
            Self::Unauthenticated => "Login",
            Self::StandardUser => "UserMain",
            Self::Expert => "ExpertMain",
        }
    }

    /// Screens of the tree in tab order
    #[must_use]
    pub const fn screens(self) -> &'static [Screen] {
        match self {
            Self::Unauthenticated => LOGIN_SCREENS,
            Self::StandardUser => USER_TABS,
            Self::Expert => EXPERT_TABS,
        }
    }

    /// Screen shown when the tree becomes active
    #[must_use]
    pub const fn initial_screen(self) -> Screen {
        match self {
            Self::Unauthenticated => Screen::Login,
            Self::StandardUser | Self::Expert => Screen::Home,
        }
    }
}

impl Display for NavTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_route())
    }
}

/// Receives navigation resets
pub trait Navigator: Send + Sync {
    /// Discard the current stack and show `tree` at its initial screen
    fn reset(&self, tree: NavTree);
}

#[derive(Debug)]
struct Stack {
    tree: NavTree,
    screens: Vec<Screen>,
}

/// Navigator that keeps the active tree and a stack of visited screens
#[derive(Debug)]
pub struct RouteStack {
    inner: Mutex<Stack>,
}

impl Default for RouteStack {
    fn default() -> Self {
        Self::new(NavTree::Unauthenticated)
    }
}

impl RouteStack {
    /// Create a stack rooted at `tree`
    #[must_use]
    pub fn new(tree: NavTree) -> Self {
        Self {
            inner: Mutex::new(Stack {
                tree,
                screens: vec![tree.initial_screen()],
            }),
        }
    }

    /// Active tree
    #[must_use]
    pub fn tree(&self) -> NavTree {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).tree
    }

    /// Screen on top of the stack
    #[must_use]
    pub fn current(&self) -> Screen {
        let stack = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        stack
            .screens
            .last()
            .copied()
            .unwrap_or_else(|| stack.tree.initial_screen())
    }

    /// Push a screen of the active tree; returns `false` for foreign screens
    pub fn push(&self, screen: Screen) -> bool {
        let mut stack = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if !stack.tree.screens().contains(&screen) {
            return false;
        }
        stack.screens.push(screen);
        true
    }

    /// Pop the top screen, never below the root
    pub fn pop(&self) -> Option<Screen> {
        let mut stack = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if stack.screens.len() > 1 {
            stack.screens.pop()
        } else {
            None
        }
    }

    /// Stack depth
    #[must_use]
    pub fn depth(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .screens
            .len()
    }
}

impl Navigator for RouteStack {
    fn reset(&self, tree: NavTree) {
        let mut stack = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        stack.tree = tree;
        stack.screens = vec![tree.initial_screen()];
        debug!(root = tree.root_route(), "Navigation reset");
    }
}
