//! Tour entity model
//!
//! Field names serialize in camelCase to match the stored collection.
//! `durationWeeks` is a virtual: computed on read, injected into the JSON
//! representation, never persisted and not queryable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

/// Tour difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    /// The accepted wire values, in declaration order.
    pub const VALUES: &'static [&'static str] = &["easy", "medium", "difficult"];
}

fn default_ratings_average() -> f64 {
    4.5
}

/// A touristic package offering
///
/// `created_at` is `Option` because default reads project it out of the
/// result set; it is always set on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub duration: f64,
    pub max_group_size: i64,
    pub difficulty: Difficulty,
    #[serde(default = "default_ratings_average")]
    pub ratings_average: f64,
    #[serde(default)]
    pub ratings_quantity: i64,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_discount: Option<f64>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_cover: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub start_dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    pub secret_tour: bool,
}

impl Tour {
    /// Virtual field: the tour duration expressed in weeks.
    pub fn duration_weeks(&self) -> f64 {
        self.duration / 7.0
    }

    /// The API representation: all serialized fields plus the
    /// `durationWeeks` virtual.
    pub fn to_json(&self) -> Value {
        let mut value = match serde_json::to_value(self) {
            Ok(value) => value,
            // A Tour always serializes: string keys, finite-or-null floats.
            Err(_) => return Value::Null,
        };
        value["durationWeeks"] = json!(self.duration_weeks());
        value
    }
}
