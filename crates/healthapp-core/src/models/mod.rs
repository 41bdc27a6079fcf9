// ABOUTME: Data models shared by the healthapp client crates
// ABOUTME: Session, user profile, role, tracking mode, and bearer token types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Session and user profile models
pub mod user;

pub use user::{BearerToken, Role, Session, TrackingMode, UserProfile};
