// ABOUTME: Re-exports command modules for the healthapp CLI
// ABOUTME: Session, dashboard, and navigation commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod dashboard;
pub mod navigation;
pub mod session;
