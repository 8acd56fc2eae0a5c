//! SeaORM entities for the planner tables.
//!
//! Status, frequency and list columns are stored as plain text and JSON.
//! Rows with values this build does not recognise are still returned,
//! with the field set to its default and a warning logged.

pub mod alarm;
pub mod content_plan;
pub mod planned_post;
pub mod scheduled_post;

use std::str::FromStr;

use sea_orm::entity::prelude::Json;

fn decode_or<T: FromStr>(raw: &str, column: &'static str, fallback: T) -> T {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(column, value = raw, "Unrecognised stored value, using default");
            fallback
        }
    }
}

fn string_list(value: Json, column: &'static str) -> Vec<String> {
    match serde_json::from_value(value) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(column, error = %e, "Stored list is not an array of strings");
            Vec::new()
        }
    }
}
