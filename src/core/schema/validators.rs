//! Reusable field validators
//!
//! Each constructor captures the fixed message the schema declares for the
//! field. Validators only reject values of the type they understand; other
//! types pass through so one check never shadows another.

use std::sync::Arc;

use serde_json::Value;

use super::Validator;

/// Validator: field must be present (not null)
pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| {
        if value.is_null() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Validator: string must have at least `min` characters
pub fn min_length(min: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| match value.as_str() {
        Some(s) if s.chars().count() < min => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Validator: string must have at most `max` characters
pub fn max_length(max: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| match value.as_str() {
        Some(s) if s.chars().count() > max => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Validator: number must be at least `min`
pub fn min_value(min: f64, message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| match value.as_f64() {
        Some(n) if n < min => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Validator: number must not exceed `max`
pub fn max_value(max: f64, message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| match value.as_f64() {
        Some(n) if n > max => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Validator: string must be one of the allowed values
pub fn one_of(allowed: &'static [&'static str], message: impl Into<String>) -> Validator {
    let message = message.into();
    Arc::new(move |value: &Value| match value.as_str() {
        Some(s) if !allowed.contains(&s) => Err(message.clone()),
        _ => Ok(()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_rejects_null() {
        let v = required("is required");
        assert_eq!(v(&json!(null)), Err("is required".to_string()));
    }

    #[test]
    fn required_accepts_any_non_null() {
        let v = required("is required");
        assert!(v(&json!("")).is_ok());
        assert!(v(&json!(0)).is_ok());
        assert!(v(&json!(false)).is_ok());
        assert!(v(&json!([])).is_ok());
    }

    #[test]
    fn min_length_rejects_short_strings() {
        let v = min_length(10, "too short");
        assert!(v(&json!("short")).is_err());
        assert!(v(&json!("exactly 10")).is_ok());
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let v = min_length(4, "too short");
        assert!(v(&json!("café")).is_ok());
    }

    #[test]
    fn max_length_rejects_long_strings() {
        let v = max_length(5, "too long");
        assert!(v(&json!("abcdef")).is_err());
        assert!(v(&json!("abcde")).is_ok());
    }

    #[test]
    fn min_length_non_string_passthrough() {
        let v = min_length(10, "too short");
        assert!(v(&json!(3)).is_ok());
        assert!(v(&json!(null)).is_ok());
    }

    #[test]
    fn min_value_rejects_below_bound() {
        let v = min_value(1.0, "too small");
        assert!(v(&json!(0.9)).is_err());
        assert!(v(&json!(1.0)).is_ok());
    }

    #[test]
    fn max_value_rejects_above_bound() {
        let v = max_value(5.0, "too big");
        assert!(v(&json!(5.1)).is_err());
        assert!(v(&json!(5.0)).is_ok());
    }

    #[test]
    fn max_value_non_number_passthrough() {
        let v = max_value(5.0, "too big");
        assert!(v(&json!("hello")).is_ok());
    }

    #[test]
    fn one_of_rejects_values_outside_list() {
        let v = one_of(&["easy", "medium", "difficult"], "not allowed");
        assert!(v(&json!("medium")).is_ok());
        assert!(v(&json!("impossible")).is_err());
    }

    #[test]
    fn one_of_non_string_passthrough() {
        let v = one_of(&["a"], "not allowed");
        assert!(v(&json!(1)).is_ok());
    }
}
