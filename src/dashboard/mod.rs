// ABOUTME: Home screen data for a standard user
// ABOUTME: Loads reminders, health stats, connected experts, today's plans, and expert suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dashboard
//!
//! The seven resources are fetched one after another with the session's
//! client. The load is all-or-nothing: if any request fails, the failure is
//! logged and an empty [`Dashboard`] is returned so the screen still renders.

/// Plain-text rendering
pub mod render;

pub use render::render;

use healthapp_core::errors::AppResult;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::api::{list_items, ApiClient, Endpoint};

const TODAY: (&str, &str) = ("today", "true");

/// Everything the home screen shows, as received from the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    /// Reminders
    pub reminders: Vec<Value>,
    /// Today's health tracking; `Null` until loaded
    pub health: Value,
    /// Connected trainer and nutritionist; `Null` until loaded
    pub connected_experts: Value,
    /// Workout plans scheduled today
    pub today_workouts: Vec<Value>,
    /// Meal plans scheduled today
    pub today_meals: Vec<Value>,
    /// Workouts suggested by a connected expert
    pub suggested_workouts: Vec<Value>,
    /// Meals suggested by a connected expert
    pub suggested_meals: Vec<Value>,
}

impl Dashboard {
    /// Whether nothing was loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Loads the dashboard with an authenticated client
pub struct DashboardLoader<'a> {
    client: &'a ApiClient,
}

impl<'a> DashboardLoader<'a> {
    /// Use `client` for every request
    #[must_use]
    pub const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Load everything, falling back to an empty dashboard on the first failure
    pub async fn load(&self) -> Dashboard {
        match self.try_load().await {
            Ok(dashboard) => dashboard,
            Err(e) => {
                error!(error = %e, code = ?e.code, "Failed to load dashboard");
                Dashboard::default()
            }
        }
    }

    /// Load everything, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first request error
    pub async fn try_load(&self) -> AppResult<Dashboard> {
        let reminders = self.list(Endpoint::Reminders, &[]).await?;
        let health = self.object(Endpoint::CurrentHealthTracking).await?;
        let connected_experts = self.object(Endpoint::ConnectedUsers).await?;
        let today_workouts = self.list(Endpoint::WorkoutPlans, &[TODAY]).await?;
        let today_meals = self.list(Endpoint::MealPlans, &[TODAY]).await?;
        let suggested_workouts = self.list(Endpoint::SuggestedWorkouts, &[]).await?;
        let suggested_meals = self.list(Endpoint::SuggestedMeals, &[]).await?;

        debug!(
            reminders = reminders.len(),
            today_workouts = today_workouts.len(),
            today_meals = today_meals.len(),
            "Dashboard loaded"
        );
        Ok(Dashboard {
            reminders,
            health,
            connected_experts,
            today_workouts,
            today_meals,
            suggested_workouts,
            suggested_meals,
        })
    }

    async fn list(&self, endpoint: Endpoint, query: &[(&str, &str)]) -> AppResult<Vec<Value>> {
        Ok(list_items(&self.client.get(&endpoint, query).await?))
    }

    async fn object(&self, endpoint: Endpoint) -> AppResult<Value> {
        let payload = self.client.get(&endpoint, &[]).await?;
        Ok(if payload.is_null() {
            Value::Object(Map::new())
        } else {
            payload
        })
    }
}
