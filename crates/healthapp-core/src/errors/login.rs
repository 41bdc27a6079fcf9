// ABOUTME: User-facing error taxonomy of the login screen
// ABOUTME: Field validation failures and the single collapsed credential failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Login Error Types
//!
//! The login screen distinguishes exactly two outcomes a user can see:
//! a missing field, reported before any network call, and a generic
//! credential failure that covers every transport, backend, and storage
//! failure after submission.

use std::error::Error;
use std::fmt;

use super::{AppError, ErrorCode};

/// Required fields of the login form, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Account username
    Username,
    /// Account password
    Password,
}

impl LoginField {
    /// All required fields in the order they are checked
    pub const REQUIRED: [Self; 2] = [Self::Username, Self::Password];

    /// Form field name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
        }
    }

    /// Display label shown next to the input
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors surfaced by the login flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// A required field was empty or whitespace
    MissingField {
        /// The first empty field
        field: LoginField,
    },
    /// Any failure after submission
    InvalidCredentials,
}

impl LoginError {
    /// Message displayed inline on the login screen
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField { field } => format!("Please enter {}", field.label()),
            Self::InvalidCredentials => "Invalid username or password.".to_owned(),
        }
    }

    /// Field the message belongs to, if any
    #[must_use]
    pub const fn field(&self) -> Option<LoginField> {
        match self {
            Self::MissingField { field } => Some(*field),
            Self::InvalidCredentials => None,
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

impl Error for LoginError {}

impl From<LoginError> for AppError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::MissingField { field } => Self::missing_field(field.name()),
            LoginError::InvalidCredentials => {
                Self::new(ErrorCode::AuthInvalid, error.user_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_the_field() {
        let error = LoginError::MissingField {
            field: LoginField::Username,
        };
        assert_eq!(error.user_message(), "Please enter Username");
        assert_eq!(error.field(), Some(LoginField::Username));
    }

    #[test]
    fn test_invalid_credentials_has_no_field() {
        let error = LoginError::InvalidCredentials;
        assert_eq!(error.field(), None);
        assert_eq!(error.to_string(), "Invalid username or password.");
    }

    #[test]
    fn test_conversion_to_app_error() {
        let app: AppError = LoginError::MissingField {
            field: LoginField::Password,
        }
        .into();
        assert_eq!(app.code, ErrorCode::MissingRequiredField);
        assert_eq!(app.context.resource_id.as_deref(), Some("password"));

        let app: AppError = LoginError::InvalidCredentials.into();
        assert_eq!(app.code, ErrorCode::AuthInvalid);
    }
}
