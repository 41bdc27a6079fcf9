// ABOUTME: Typed catalog of backend REST paths used by the app
// ABOUTME: Flat resources plus identifier-templated detail and lookup paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Display, Formatter};

/// Identifier used in templated paths
pub type ResourceId = u64;

/// Backend endpoint, rendered to a path relative to the base URL
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    // Auth
    /// `OAuth2` password grant
    Login,

    // User
    /// User registration
    RegisterUser,
    /// Profile of the authenticated user
    CurrentUser,
    /// Tracking mode of the authenticated user
    UserTracking,

    // Expert
    /// Expert registration
    RegisterExperts,
    /// Profile of the authenticated expert
    CurrentExpert,
    /// All trainers
    Trainers,
    /// All nutritionists
    Nutritionists,
    /// Experts connected to the user, or users connected to the expert
    ConnectedUsers,
    /// Number of users connected to the expert
    ConnectedUserCount,
    /// Public detail of an expert
    ExpertDetail(ResourceId),
    /// Detail of a user connected to an expert
    ConnectedUserDetail(ResourceId),

    // Health profile
    /// Health profiles
    HealthProfiles,
    /// Health profile of a given user
    HealthProfileByUser(ResourceId),
    /// Health profile of the authenticated user
    CurrentHealthProfile,

    // Health tracking
    /// Daily health trackings
    HealthTrackings,
    /// Trackings of a given user
    HealthTrackingByUser(ResourceId),
    /// Today's tracking of the authenticated user
    CurrentHealthTracking,

    // Workouts
    /// All workouts
    Workouts,
    /// Workouts created by the user
    OwnWorkouts,
    /// Workouts suggested by a connected expert
    SuggestedWorkouts,
    /// One workout
    WorkoutDetail(ResourceId),

    // Workout plans
    /// Workout plans
    WorkoutPlans,
    /// One workout plan
    WorkoutPlanDetail(ResourceId),

    // Meals
    /// All meals
    Meals,
    /// Meals created by the user
    OwnMeals,
    /// Meals suggested by a connected expert
    SuggestedMeals,
    /// One meal
    MealDetail(ResourceId),

    // Meal plans
    /// Meal plans
    MealPlans,
    /// One meal plan
    MealPlanDetail(ResourceId),

    // Health journals
    /// Journal entries
    HealthJournals,
    /// One journal entry
    HealthJournalDetail(ResourceId),

    // Reminders
    /// Reminders
    Reminders,
    /// One reminder
    ReminderDetail(ResourceId),

    // Reviews
    /// Reviews of an expert
    ExpertReviews(ResourceId),
    /// The authenticated user's review of an expert
    MyReview(ResourceId),

    // Chats
    /// Conversations
    Chats,
    /// One conversation
    ChatDetail(ResourceId),

    // Reports
    /// Health progress report of the user
    UserHealthProgress,
    /// Workout statistics of the user
    UserWorkoutStats,
    /// Meal statistics of the user
    UserMealStats,
    /// Progress of an expert's clients
    ExpertClientProgress,
}

impl Endpoint {
    /// Path relative to the base URL, always with leading and trailing slash
    #[must_use]
    pub fn path(&self) -> String {
        match *self {
            Self::Login => "/o/token/".to_owned(),

            Self::RegisterUser => "/users/".to_owned(),
            Self::CurrentUser => "/users/current-user/".to_owned(),
            Self::UserTracking => "/users/tracking/".to_owned(),

            Self::RegisterExperts => "/experts/".to_owned(),
            Self::CurrentExpert => "/experts/current-expert/".to_owned(),
            Self::Trainers => "/experts/trainers/".to_owned(),
            Self::Nutritionists => "/experts/nutritionists/".to_owned(),
            Self::ConnectedUsers => "/experts/connected-users/".to_owned(),
            Self::ConnectedUserCount => "/experts/connected-user-count/".to_owned(),
            Self::ExpertDetail(id) => format!("/experts/{id}/detail/"),
            Self::ConnectedUserDetail(id) => format!("/experts/{id}/user-detail/"),

            Self::HealthProfiles => "/health-profiles/".to_owned(),
            Self::HealthProfileByUser(user_id) => format!("/health-profiles/by-user/{user_id}/"),
            Self::CurrentHealthProfile => "/health-profiles/current-profile/".to_owned(),

            Self::HealthTrackings => "/health-trackings/".to_owned(),
            Self::HealthTrackingByUser(user_id) => {
                format!("/health-trackings/by-user/{user_id}/")
            }
            Self::CurrentHealthTracking => "/health-trackings/current-tracking/".to_owned(),

            Self::Workouts => "/workouts/".to_owned(),
            Self::OwnWorkouts => "/workouts/own/".to_owned(),
            Self::SuggestedWorkouts => "/workouts/suggested-by-expert/".to_owned(),
            Self::WorkoutDetail(id) => format!("/workouts/{id}/"),

            Self::WorkoutPlans => "/workout-plans/".to_owned(),
            Self::WorkoutPlanDetail(id) => format!("/workout-plans/{id}/"),

            Self::Meals => "/meals/".to_owned(),
            Self::OwnMeals => "/meals/own/".to_owned(),
            Self::SuggestedMeals => "/meals/suggested-by-expert/".to_owned(),
            Self::MealDetail(id) => format!("/meals/{id}/"),

            Self::MealPlans => "/meal-plans/".to_owned(),
            Self::MealPlanDetail(id) => format!("/meal-plans/{id}/"),

            Self::HealthJournals => "/health-journals/".to_owned(),
            Self::HealthJournalDetail(id) => format!("/health-journals/{id}/"),

            Self::Reminders => "/reminders/".to_owned(),
            Self::ReminderDetail(id) => format!("/reminders/{id}/"),

            Self::ExpertReviews(expert_id) => format!("/reviews/{expert_id}/"),
            Self::MyReview(expert_id) => format!("/reviews/{expert_id}/my-review/"),

            Self::Chats => "/chats/".to_owned(),
            Self::ChatDetail(id) => format!("/chats/{id}/"),

            Self::UserHealthProgress => "/reports/user-health-progress/".to_owned(),
            Self::UserWorkoutStats => "/reports/user-workout-stats/".to_owned(),
            Self::UserMealStats => "/reports/user-meal-stats/".to_owned(),
            Self::ExpertClientProgress => "/reports/expert-client-progress/".to_owned(),
        }
    }

    /// Whether the endpoint is callable without a bearer token
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::RegisterUser | Self::RegisterExperts)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
