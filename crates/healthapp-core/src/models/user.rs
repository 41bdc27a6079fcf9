// ABOUTME: Session models for the logged-in principal
// ABOUTME: Session, UserProfile, Role, TrackingMode, and BearerToken definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{roles, tracking_modes};
use crate::errors::AppError;

/// Role of an authenticated principal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    /// Plain user tracking their own health
    #[serde(rename = "user")]
    StandardUser,
    /// Trainer or nutritionist coaching connected users
    #[serde(rename = "expert")]
    Expert,
}

impl Role {
    /// Wire representation used by the backend
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StandardUser => roles::USER,
            Self::Expert => roles::EXPERT,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            roles::USER => Ok(Self::StandardUser),
            roles::EXPERT => Ok(Self::Expert),
            _ => Err(AppError::invalid_input(format!("Invalid role: {s}"))),
        }
    }
}

/// How a standard user tracks their health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Self-tracking; no expert widgets
    #[default]
    Personal,
    /// Connected to a trainer and/or nutritionist
    ExpertConnection,
}

impl TrackingMode {
    /// Parse the backend value, treating anything unknown as personal
    #[must_use]
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some(tracking_modes::EXPERT_CONNECTION | tracking_modes::CONNECTED) => {
                Self::ExpertConnection
            }
            _ => Self::Personal,
        }
    }

    /// Whether expert widgets are shown on the dashboard
    #[must_use]
    pub const fn shows_expert_widgets(self) -> bool {
        matches!(self, Self::ExpertConnection)
    }
}

/// Current-user payload returned by the backend
///
/// The payload is kept exactly as received. Accessors read the fields the
/// client cares about and return `None` for anything missing or mistyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    /// Wrap a raw JSON payload without validation
    #[must_use]
    pub const fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Raw payload
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// User identifier, rendered as a string whether numeric or textual
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Login name
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.str_field("username")
    }

    /// Given name
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.str_field("first_name")
    }

    /// Family name
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.str_field("last_name")
    }

    /// Display name, family name first, falling back to the username
    #[must_use]
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.last_name(), self.first_name()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            self.username().unwrap_or_default().to_owned()
        } else {
            parts.join(" ")
        }
    }

    /// Role string exactly as sent by the backend
    #[must_use]
    pub fn raw_role(&self) -> Option<&str> {
        self.str_field("role")
    }

    /// Role parsed into the closed set, `None` when absent or unknown
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.raw_role().and_then(|role| role.parse().ok())
    }

    /// Dashboard tracking mode
    #[must_use]
    pub fn tracking_mode(&self) -> TrackingMode {
        TrackingMode::from_wire(self.str_field("tracking_mode"))
    }
}

/// Opaque bearer credential; never printed in debug output
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token value for the `Authorization` header or storage
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

/// The authenticated principal held by the session container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Current-user payload
    pub profile: UserProfile,
    /// Credential used for authenticated calls on behalf of this user
    pub token: BearerToken,
}

impl Session {
    /// Build a session from a fetched profile and the token that fetched it
    #[must_use]
    pub const fn new(profile: UserProfile, token: BearerToken) -> Self {
        Self { profile, token }
    }

    /// Role parsed into the closed set
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.profile.role()
    }
}
