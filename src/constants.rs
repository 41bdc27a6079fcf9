// ABOUTME: Constants shared with the core crate
// ABOUTME: Storage keys, OAuth values, role names, environment variables, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use healthapp_core::constants::*;
