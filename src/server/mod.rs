//! HTTP server assembly

pub mod router;

pub use router::{AppState, build_router};
