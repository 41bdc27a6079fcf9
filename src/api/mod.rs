// ABOUTME: Backend API access for the healthapp client
// ABOUTME: Endpoint catalog and the anonymous/authenticated HTTP client factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Backend API layer
//!
//! Every request is resolved against the configured base URL. Authenticated
//! clients attach the bearer token; anonymous clients are used for the token
//! grant only.

/// HTTP client factory
pub mod client;
/// Backend path catalog
pub mod endpoints;

pub use client::{ApiClient, ApiFactory};
pub use endpoints::{Endpoint, ResourceId};

use serde_json::Value;

/// Extract list items from a response that is either a bare array or a
/// paginated object with a `results` array
#[must_use]
pub fn list_items(payload: &Value) -> Vec<Value> {
    match payload {
        Value::Array(items) => items.clone(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
