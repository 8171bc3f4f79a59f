//! Tour domain module
//!
//! The model declares the field shapes, the schema declares the
//! constraints and defaults, and the repository applies both on the way
//! into and out of the `tours` collection.

pub mod handlers;
pub mod model;
pub mod repository;
pub mod schema;

pub use model::{Difficulty, Tour};
pub use repository::TourRepository;
