//! Reusable field filters
//!
//! Filters transform field values before validation. Non-matching types
//! pass through untouched so the validators can report them.

use std::sync::Arc;

use serde_json::Value;

use super::Filter;

/// Filter: trim surrounding whitespace from a string
pub fn trim() -> Filter {
    Arc::new(|value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.trim().to_string())
        } else {
            value
        }
    })
}

/// Filter: convert a string to lowercase
pub fn lowercase() -> Filter {
    Arc::new(|value: Value| {
        if let Some(s) = value.as_str() {
            Value::String(s.to_lowercase())
        } else {
            value
        }
    })
}
