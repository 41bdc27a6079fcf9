// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Storage keys, OAuth grant values, environment variable names, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Persisted credential storage
pub mod storage {
    /// Key under which the bearer token is persisted
    pub const TOKEN_KEY: &str = "token";

    /// Directory name under the platform config dir
    pub const CONFIG_DIR_NAME: &str = "healthapp";

    /// File name of the file-backed token store
    pub const CREDENTIALS_FILE: &str = "credentials.json";
}

/// OAuth2 password grant values
pub mod oauth {
    /// Grant type sent with the login request
    pub const GRANT_TYPE_PASSWORD: &str = "password";
}

/// Role identifiers as sent by the backend
pub mod roles {
    /// Plain user role
    pub const USER: &str = "user";
    /// Expert (trainer or nutritionist) role
    pub const EXPERT: &str = "expert";
}

/// Tracking mode identifiers as sent by the backend
pub mod tracking_modes {
    /// Personal self-tracking
    pub const PERSONAL: &str = "personal";
    /// Tracking together with a connected expert
    pub const EXPERT_CONNECTION: &str = "expert_connection";
    /// Older backend spelling of `EXPERT_CONNECTION`
    pub const CONNECTED: &str = "connected";
}

/// Environment variable names read by the client configuration
pub mod env_vars {
    /// Backend base URL
    pub const BASE_URL: &str = "HEALTHAPP_BASE_URL";
    /// OAuth application client id
    pub const CLIENT_ID: &str = "HEALTHAPP_CLIENT_ID";
    /// OAuth application client secret
    pub const CLIENT_SECRET: &str = "HEALTHAPP_CLIENT_SECRET";
    /// Token store backend (`file` or `memory`)
    pub const TOKEN_STORE: &str = "HEALTHAPP_TOKEN_STORE";
    /// Path of the file-backed token store
    pub const TOKEN_PATH: &str = "HEALTHAPP_TOKEN_PATH";
    /// Remove a persisted token the backend rejected during bootstrap
    pub const CLEAR_STALE_TOKEN: &str = "HEALTHAPP_CLEAR_STALE_TOKEN";
    /// User agent override
    pub const USER_AGENT: &str = "HEALTHAPP_USER_AGENT";
}

/// Default values
pub mod defaults {
    /// Backend base URL used when none is configured
    pub const BASE_URL: &str = "http://127.0.0.1:8000/";
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "healthapp";
    /// Header carrying the per-request correlation id
    pub const REQUEST_ID_HEADER: &str = "x-request-id";
}
