//! Router assembly for the tours API

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::tours::TourRepository;
use crate::tours::handlers::{
    create_tour, delete_tour, get_tour, list_tours, tour_stats, update_tour,
};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub tours: TourRepository,
}

/// Build the application router.
///
/// - `GET    /health`      — liveness probe
/// - `GET    /tours`       — list visible tours
/// - `POST   /tours`       — create a tour
/// - `GET    /tours/stats` — per-difficulty aggregation
/// - `GET    /tours/{id}`  — fetch one visible tour
/// - `PATCH  /tours/{id}`  — partial update
/// - `DELETE /tours/{id}`  — delete
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tours", get(list_tours).post(create_tour))
        .route("/tours/stats", get(tour_stats))
        .route(
            "/tours/{id}",
            get(get_tour).patch(update_tour).delete(delete_tour),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "tours-api",
    }))
}
