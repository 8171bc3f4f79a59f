//! # Tours API
//!
//! A small content-management style API exposing a single `Tour` resource
//! backed by MongoDB.
//!
//! ## Architecture
//!
//! - **Declarative schema**: field shapes, constraints, filters, and
//!   defaults are plain data (`core::schema`) consumed by a small reusable
//!   validation routine, not logic buried in mutation methods.
//! - **Repository wrapper**: every read-style operation on the `tours`
//!   collection goes through [`tours::TourRepository`], which conjoins the
//!   secret-tour exclusion predicate onto caller filters and prepends it to
//!   aggregation pipelines. The filtering is explicit and testable rather
//!   than hidden middleware.
//! - **Gated bootstrap**: the HTTP listener only binds after the database
//!   connection has been established and verified.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tours_api::tours::TourRepository;
//! use serde_json::json;
//!
//! let repo = TourRepository::new(database);
//! repo.ensure_indexes().await?;
//!
//! let tour = repo
//!     .create(json!({
//!         "name": "The Forest Hiker",
//!         "duration": 5,
//!         "maxGroupSize": 25,
//!         "difficulty": "easy",
//!         "price": 397,
//!         "summary": "Breathtaking hike through the Canadian Banff National Park",
//!         "imageCover": "tour-1-cover.jpg"
//!     }))
//!     .await?;
//!
//! assert_eq!(tour.slug, "the-forest-hiker");
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod tours;

/// Re-exports of commonly used types
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::core::error::{ApiError, ConfigError, FieldError};
    pub use crate::core::slug::slugify;
    pub use crate::server::{AppState, build_router};
    pub use crate::tours::{Difficulty, Tour, TourRepository};
}
