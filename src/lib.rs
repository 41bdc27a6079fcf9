// ABOUTME: Main library entry point for the healthapp client core
// ABOUTME: Session state, role-based navigation, login, bootstrap, and REST access to the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # healthapp
//!
//! Client-side core of a health tracking product. A plain user tracks
//! reminders, health metrics, and workout and meal plans; an expert coaches
//! connected users. Both talk to the same REST backend.
//!
//! ## Architecture
//!
//! - **API**: HTTP client factory bound to the backend base URL
//! - **Storage**: persisted bearer token behind the `TokenStore` trait
//! - **Session**: pure reducer plus an observable container
//! - **Bootstrap**: restores the session from a persisted token at start
//! - **Navigation**: total selection of one of three navigation trees
//! - **Login** and **Dashboard**: the two screens with behavior of their own
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use healthapp::app::App;
//! use healthapp::config::ClientConfig;
//! use healthapp::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let app = App::new(ClientConfig::from_env()?)?;
//!     app.start().await;
//!
//!     if let Some(tree) = app.current_tree() {
//!         println!("Active navigation root: {tree}");
//!     }
//!     Ok(())
//! }
//! ```

/// Backend endpoints and HTTP client factory
pub mod api;

/// Application shell
pub mod app;

/// Session restoration at process start
pub mod bootstrap;

/// Client configuration
pub mod config;

/// Constants shared with the core crate
pub mod constants;

/// User home screen
pub mod dashboard;

/// Error types
pub mod errors;

/// Structured logging
pub mod logging;

/// Login form and password grant
pub mod login;

/// Session models
pub mod models;

/// Role-based navigation
pub mod navigation;

/// Session state and container
pub mod session;

/// Persisted token storage
pub mod storage;
