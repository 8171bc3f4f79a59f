//! Declarative schema validation
//!
//! A schema is plain data: one [`FieldRule`] per field (filters applied
//! before validation, validators with fixed messages, an optional default)
//! plus whole-document [`DocumentRule`]s for cross-field constraints. The
//! single reusable routine [`SchemaConfig::validate`] applies a schema to a
//! candidate payload and either returns the normalized payload or the full
//! list of failing fields.

pub mod filters;
pub mod validators;

use std::sync::Arc;

use serde_json::Value;

use crate::core::error::FieldError;

/// Transform applied to a field value before validation (trim, lowercase, ...)
pub type Filter = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Check applied to a field value, failing with a fixed message
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Check applied to the whole normalized document
pub type DocumentValidator = Arc<dyn Fn(&Value) -> Result<(), FieldError> + Send + Sync>;

/// The operation a payload is being validated for.
///
/// Update payloads are partial: absent fields are skipped, defaults are not
/// injected, and creation-scoped document rules do not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
}

/// Declarative rules for a single field
pub struct FieldRule {
    pub name: &'static str,
    filters: Vec<Filter>,
    validators: Vec<Validator>,
    default: Option<Value>,
}

impl FieldRule {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            filters: Vec::new(),
            validators: Vec::new(),
            default: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Value injected when the field is absent from a creation payload.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// Scope of a document-level rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    CreateOnly,
    Always,
}

/// Cross-field constraint over the normalized document
pub struct DocumentRule {
    scope: Scope,
    check: DocumentValidator,
}

impl DocumentRule {
    /// Rule that runs only when validating a creation payload.
    pub fn on_create(
        check: impl Fn(&Value) -> Result<(), FieldError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            scope: Scope::CreateOnly,
            check: Arc::new(check),
        }
    }

    /// Rule that runs for every operation.
    pub fn always(
        check: impl Fn(&Value) -> Result<(), FieldError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            scope: Scope::Always,
            check: Arc::new(check),
        }
    }
}

/// A complete schema: ordered field rules plus document rules.
///
/// Unknown fields in the payload are dropped — only declared fields pass
/// through to the normalized output.
pub struct SchemaConfig {
    fields: Vec<FieldRule>,
    document_rules: Vec<DocumentRule>,
}

impl SchemaConfig {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self {
            fields,
            document_rules: Vec::new(),
        }
    }

    pub fn document_rule(mut self, rule: DocumentRule) -> Self {
        self.document_rules.push(rule);
        self
    }

    /// Validate and normalize a candidate payload.
    ///
    /// Filters run before validators. Every failing field is collected —
    /// the caller gets the complete list, not just the first failure.
    /// Explicit `null` is treated the same as an absent field.
    pub fn validate(&self, payload: Value, operation: Operation) -> Result<Value, Vec<FieldError>> {
        let Value::Object(input) = payload else {
            return Err(vec![FieldError::new("body", "Payload must be a JSON object")]);
        };

        let mut output = serde_json::Map::new();
        let mut errors = Vec::new();

        for rule in &self.fields {
            let raw = match input.get(rule.name) {
                Some(Value::Null) | None => None,
                Some(value) => Some(value.clone()),
            };

            match raw {
                None if operation == Operation::Update => continue,
                None => {
                    if let Some(default) = &rule.default {
                        output.insert(rule.name.to_string(), default.clone());
                        continue;
                    }
                    for validator in &rule.validators {
                        if let Err(message) = validator(&Value::Null) {
                            errors.push(FieldError::new(rule.name, message));
                        }
                    }
                }
                Some(mut value) => {
                    for filter in &rule.filters {
                        value = filter(value);
                    }
                    for validator in &rule.validators {
                        if let Err(message) = validator(&value) {
                            errors.push(FieldError::new(rule.name, message));
                        }
                    }
                    output.insert(rule.name.to_string(), value);
                }
            }
        }

        let normalized = Value::Object(output);
        for rule in &self.document_rules {
            if rule.scope == Scope::CreateOnly && operation == Operation::Update {
                continue;
            }
            if let Err(error) = (rule.check)(&normalized) {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}
