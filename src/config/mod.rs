// ABOUTME: Configuration module for the healthapp client
// ABOUTME: Environment-only configuration with builder-style overrides for CLI flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: client configuration read from `HEALTHAPP_*` variables

/// Environment and client configuration
pub mod environment;

pub use environment::{
    ClientConfig, OAuthClientCredentials, TokenStoreBackend, TokenStoreConfig,
};
