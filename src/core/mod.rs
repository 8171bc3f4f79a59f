//! Core module containing the error taxonomy and the declarative
//! schema/validation toolkit

pub mod error;
pub mod schema;
pub mod slug;

pub use error::{ApiError, ConfigError, FieldError};
pub use schema::{DocumentRule, FieldRule, Operation, SchemaConfig};
