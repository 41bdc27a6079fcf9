// ABOUTME: Plain-text rendering of the home screen
// ABOUTME: Formats dates, reminder times, health stats, plans, and expert sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{NaiveDate, NaiveTime};
use healthapp_core::models::UserProfile;
use serde_json::Value;

use super::Dashboard;

const NOT_UPDATED: &str = "Not updated";

/// Render the dashboard for `profile` as of `today`
#[must_use]
pub fn render(dashboard: &Dashboard, profile: &UserProfile, today: NaiveDate) -> String {
    let mut out = String::new();
    let expert_mode = profile.tracking_mode().shows_expert_widgets();

    line(
        &mut out,
        &format!(
            "Hello, {} {}",
            profile.last_name().unwrap_or_default(),
            profile.first_name().unwrap_or_default()
        ),
    );
    line(&mut out, &format!("Today: {}", today.format("%d/%m/%Y")));

    section(&mut out, "Reminders today");
    if dashboard.reminders.is_empty() {
        line(&mut out, "No reminders");
    }
    for reminder in &dashboard.reminders {
        line(
            &mut out,
            &format!("- {} {}", reminder_time(reminder), reminder_title(reminder)),
        );
    }

    section(&mut out, "Health stats today");
    let health = &dashboard.health;
    stat(&mut out, "BMI", health.get("bmi"), "");
    stat(&mut out, "Steps", health.get("step_count"), "steps");
    stat(&mut out, "Heart rate", health.get("heart_rate"), "bpm");
    stat(&mut out, "Water", health.get("water_intake"), "ml");

    if expert_mode && !dashboard.connected_experts.is_null() {
        section(&mut out, "Connected experts");
        expert(&mut out, "Trainer", dashboard.connected_experts.get("trainer"));
        expert(
            &mut out,
            "Nutritionist",
            dashboard.connected_experts.get("nutritionist"),
        );
    }

    section(&mut out, "Today's plan");
    titled_items(
        &mut out,
        "Workout",
        &dashboard.today_workouts,
        "No workouts today",
    );
    titled_items(&mut out, "Meal", &dashboard.today_meals, "No meals today");

    if expert_mode {
        section(&mut out, "Expert suggestions");
        line(
            &mut out,
            if dashboard.suggested_workouts.is_empty() {
                "Your expert has not suggested any workouts yet"
            } else {
                "View suggested workouts"
            },
        );
        line(
            &mut out,
            if dashboard.suggested_meals.is_empty() {
                "Your expert has not suggested any meals yet"
            } else {
                "View suggested meals"
            },
        );
    }

    out
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, title: &str) {
    line(out, "");
    line(out, &format!("{title}:"));
}

/// Scalar JSON value as display text; `None` for null
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn stat(out: &mut String, label: &str, value: Option<&Value>, unit: &str) {
    let text = value.and_then(scalar).map_or_else(
        || NOT_UPDATED.to_owned(),
        |v| format!("{v} {unit}").trim_end().to_owned(),
    );
    line(out, &format!("{label}: {text}"));
}

/// `HH:MM:SS` shortened to `HH:MM`; anything unparseable is shown as received
fn reminder_time(reminder: &Value) -> String {
    let Some(raw) = reminder.get("time").and_then(Value::as_str) else {
        return "--:--".to_owned();
    };
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_or_else(|_| raw.to_owned(), |t| t.format("%H:%M").to_string())
}

fn reminder_title(reminder: &Value) -> String {
    ["title", "message"]
        .iter()
        .find_map(|key| reminder.get(*key).and_then(scalar))
        .unwrap_or_default()
}

fn expert(out: &mut String, label: &str, expert: Option<&Value>) {
    let Some(expert) = expert.filter(|e| !e.is_null()) else {
        return;
    };
    let name = expert
        .get("full_name")
        .and_then(scalar)
        .unwrap_or_default();
    line(out, &format!("{label}: {name} [chat]"));
}

fn titled_items(out: &mut String, kind: &str, items: &[Value], empty: &str) {
    if items.is_empty() {
        line(out, empty);
        return;
    }
    for item in items {
        let title = item.get("title").and_then(scalar).unwrap_or_default();
        line(out, &format!("- {kind}: {title}"));
    }
}
