//! Tour HTTP handlers
//!
//! Handlers are thin: validation, defaults, slug derivation, and the
//! secret-tour exclusion all live in the repository, so every entry point
//! into the collection behaves the same whether or not HTTP is involved.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use mongodb::bson::{Bson, Document, doc};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::core::error::ApiError;
use crate::server::AppState;
use crate::tours::Tour;

pub async fn list_tours(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let tours = state.tours.find(doc! {}).await?;
    let body: Vec<Value> = tours.iter().map(Tour::to_json).collect();
    Ok(Json(json!({
        "tours": body,
        "count": body.len(),
    })))
}

pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let tour = state
        .tours
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound { id })?;
    Ok(Json(tour.to_json()))
}

pub async fn create_tour(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let tour = state.tours.create(payload).await?;
    Ok((StatusCode::CREATED, Json(tour.to_json())))
}

pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let tour = state.tours.update(&id, payload).await?;
    Ok(Json(tour.to_json()))
}

pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.tours.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Per-difficulty statistics over well-rated tours.
pub async fn tour_stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let results = state.tours.aggregate(stats_pipeline()).await?;
    let stats: Vec<Value> = results
        .into_iter()
        .map(|doc| Bson::Document(doc).into_relaxed_extjson())
        .collect();
    Ok(Json(json!({ "stats": stats })))
}

/// Group tours rated 4.5 or better by difficulty, cheapest group first.
///
/// The repository prepends the secret-tour `$match`, so the pipeline only
/// declares the statistics themselves.
pub(crate) fn stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$match": { "ratingsAverage": { "$gte": 4.5 } } },
        doc! { "$group": {
            "_id": { "$toUpper": "$difficulty" },
            "numTours": { "$sum": 1 },
            "numRatings": { "$sum": "$ratingsQuantity" },
            "avgRating": { "$avg": "$ratingsAverage" },
            "avgPrice": { "$avg": "$price" },
            "minPrice": { "$min": "$price" },
            "maxPrice": { "$max": "$price" },
        }},
        doc! { "$sort": { "avgPrice": 1 } },
    ]
}
