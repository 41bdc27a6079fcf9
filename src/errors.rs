// ABOUTME: Error types shared with the core crate
// ABOUTME: Re-exports AppError, ErrorCode, and the login error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use healthapp_core::errors::*;
