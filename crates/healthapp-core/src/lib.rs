// ABOUTME: Core types and constants for the healthapp client
// ABOUTME: Foundation crate with error handling, session models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Healthapp Core
//!
//! Foundation crate providing shared types and constants for the healthapp
//! client. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the login error taxonomy
//! - **constants**: Storage keys, environment variable names, and OAuth constants
//! - **models**: Session, role, and tracking-mode types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Session data models (`Session`, `UserProfile`, `Role`, `TrackingMode`)
pub mod models;
