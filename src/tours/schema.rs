//! Declarative Tour schema configuration
//!
//! The complete behavioral contract for candidate tour documents, expressed
//! as plain data consumed by [`SchemaConfig::validate`]. Message strings are
//! fixed per field; only the price-discount message substitutes the
//! offending value.

use serde_json::{Value, json};

use crate::core::error::FieldError;
use crate::core::schema::filters::trim;
use crate::core::schema::validators::{
    max_length, max_value, min_length, min_value, one_of, required,
};
use crate::core::schema::{DocumentRule, FieldRule, SchemaConfig};

use super::model::Difficulty;

/// Build the Tour schema.
///
/// The `priceDiscount < price` rule is scoped to creation: it compares
/// against creation-time document state, and updates do not re-run it.
pub fn config() -> SchemaConfig {
    SchemaConfig::new(vec![
        FieldRule::new("name")
            .filter(trim())
            .validator(required("A tour must have a name"))
            .validator(min_length(
                10,
                "A tour name must have more or equal 10 characters",
            ))
            .validator(max_length(
                40,
                "A tour name must have less or equal 40 characters",
            )),
        FieldRule::new("duration").validator(required("A tour must have a duration")),
        FieldRule::new("maxGroupSize").validator(required("A tour must have a maxGroupSize")),
        FieldRule::new("difficulty")
            .validator(required("A tour must have a difficulty"))
            .validator(one_of(
                Difficulty::VALUES,
                "Difficulty is either: easy, medium, difficult",
            )),
        FieldRule::new("ratingsAverage")
            .default_value(json!(4.5))
            .validator(min_value(1.0, "Rating must be above 1.0"))
            .validator(max_value(5.0, "Rating must be below or equal 5.0")),
        FieldRule::new("ratingsQuantity").default_value(json!(0)),
        FieldRule::new("price").validator(required("A tour must have a price")),
        FieldRule::new("priceDiscount"),
        FieldRule::new("summary")
            .filter(trim())
            .validator(required("A tour must have a description")),
        FieldRule::new("description").filter(trim()),
        FieldRule::new("imageCover").validator(required("A tour must have a cover image")),
        FieldRule::new("images"),
        FieldRule::new("startDates"),
        FieldRule::new("secretTour").default_value(json!(false)),
    ])
    .document_rule(DocumentRule::on_create(price_discount_below_price))
}

fn price_discount_below_price(doc: &Value) -> Result<(), FieldError> {
    let Some(discount) = doc.get("priceDiscount").and_then(Value::as_f64) else {
        return Ok(());
    };
    let price = doc.get("price").and_then(Value::as_f64).unwrap_or(0.0);
    if discount < price {
        Ok(())
    } else {
        Err(FieldError::new(
            "priceDiscount",
            format!("Discount price ({discount}) should be below price"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Operation;

    fn valid_payload() -> Value {
        json!({
            "name": "The Forest Hiker",
            "duration": 5,
            "maxGroupSize": 25,
            "difficulty": "easy",
            "price": 397,
            "summary": "Breathtaking hike through the Canadian Banff National Park",
            "imageCover": "tour-1-cover.jpg"
        })
    }

    fn messages_for(errors: &[FieldError], field: &str) -> Vec<String> {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.clone())
            .collect()
    }

    #[test]
    fn valid_payload_passes_and_gets_defaults() {
        let normalized = config()
            .validate(valid_payload(), Operation::Create)
            .expect("should validate");
        assert_eq!(normalized["ratingsAverage"], json!(4.5));
        assert_eq!(normalized["ratingsQuantity"], json!(0));
        assert_eq!(normalized["secretTour"], json!(false));
    }

    #[test]
    fn empty_payload_enumerates_every_required_field() {
        let errors = config()
            .validate(json!({}), Operation::Create)
            .expect_err("should fail");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        for required in [
            "name",
            "duration",
            "maxGroupSize",
            "difficulty",
            "price",
            "summary",
            "imageCover",
        ] {
            assert!(fields.contains(&required), "missing error for {required}");
        }
    }

    #[test]
    fn short_name_fails_with_fixed_message() {
        let mut payload = valid_payload();
        payload["name"] = json!("Too short");
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "name"),
            vec!["A tour name must have more or equal 10 characters"]
        );
    }

    #[test]
    fn long_name_fails_with_fixed_message() {
        let mut payload = valid_payload();
        payload["name"] = json!("This tour name is way too long to be accepted here");
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "name"),
            vec!["A tour name must have less or equal 40 characters"]
        );
    }

    #[test]
    fn name_is_trimmed_before_length_check() {
        let mut payload = valid_payload();
        payload["name"] = json!("   Too short   ");
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("trimmed name is 9 characters");
        assert!(!messages_for(&errors, "name").is_empty());
    }

    #[test]
    fn unknown_difficulty_fails_with_enum_message() {
        let mut payload = valid_payload();
        payload["difficulty"] = json!("impossible");
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "difficulty"),
            vec!["Difficulty is either: easy, medium, difficult"]
        );
    }

    #[test]
    fn ratings_average_bounds() {
        let mut payload = valid_payload();
        payload["ratingsAverage"] = json!(0.5);
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "ratingsAverage"),
            vec!["Rating must be above 1.0"]
        );

        let mut payload = valid_payload();
        payload["ratingsAverage"] = json!(5.5);
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "ratingsAverage"),
            vec!["Rating must be below or equal 5.0"]
        );
    }

    #[test]
    fn discount_at_or_above_price_fails_with_value_in_message() {
        let mut payload = valid_payload();
        payload["price"] = json!(100);
        payload["priceDiscount"] = json!(150);
        let errors = config()
            .validate(payload, Operation::Create)
            .expect_err("should fail");
        assert_eq!(
            messages_for(&errors, "priceDiscount"),
            vec!["Discount price (150) should be below price"]
        );
    }

    #[test]
    fn discount_below_price_passes() {
        let mut payload = valid_payload();
        payload["price"] = json!(100);
        payload["priceDiscount"] = json!(50);
        assert!(config().validate(payload, Operation::Create).is_ok());
    }

    #[test]
    fn discount_equal_to_price_fails() {
        let mut payload = valid_payload();
        payload["price"] = json!(100);
        payload["priceDiscount"] = json!(100);
        assert!(config().validate(payload, Operation::Create).is_err());
    }

    #[test]
    fn discount_rule_is_creation_scoped() {
        // Update payloads never re-run the cross-field discount rule.
        let payload = json!({ "priceDiscount": 150 });
        assert!(config().validate(payload, Operation::Update).is_ok());
    }

    #[test]
    fn update_validates_only_present_fields() {
        let payload = json!({ "difficulty": "hard" });
        let errors = config()
            .validate(payload, Operation::Update)
            .expect_err("should fail");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "difficulty");
    }

    #[test]
    fn summary_and_description_are_trimmed() {
        let mut payload = valid_payload();
        payload["summary"] = json!("  padded summary  ");
        payload["description"] = json!("  padded description  ");
        let normalized = config()
            .validate(payload, Operation::Create)
            .expect("should validate");
        assert_eq!(normalized["summary"], "padded summary");
        assert_eq!(normalized["description"], "padded description");
    }
}
