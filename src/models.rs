// ABOUTME: Session data models shared with the core crate
// ABOUTME: Re-exports Session, UserProfile, Role, TrackingMode, and BearerToken
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Backend payloads are kept as raw JSON; only the session principal is typed.

pub use healthapp_core::models::*;
