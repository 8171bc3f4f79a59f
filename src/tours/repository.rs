//! Tour repository
//!
//! Explicit repository-layer wrapper around the `tours` collection. Secret
//! tours are hidden by construction: every read-style operation conjoins
//! `secretTour != true` onto the caller-supplied filter, and every
//! aggregation gets the same predicate prepended as a `$match` stage. The
//! filtering lives here, in plain sight, instead of in interception hooks.
//!
//! # Storage model
//!
//! Documents are serialized via a `serde_json::Value` intermediate and
//! converted to BSON, so UUIDs are stored as strings and timestamps as
//! ISO 8601 strings. The `id` field maps to MongoDB's `_id` convention.
//! Default reads project `createdAt` out of the result set.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};
use serde_json::Value;
use uuid::Uuid;

use crate::core::error::{ApiError, FieldError};
use crate::core::schema::Operation;
use crate::core::slug::slugify;

use super::model::Tour;
use super::schema;

const COLLECTION: &str = "tours";
const SECRET_TOUR: &str = "secretTour";
const CREATED_AT: &str = "createdAt";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an object) into a BSON
/// document, renaming `id` → `_id`.
fn json_to_document(json: Value) -> Result<Document, ApiError> {
    let bson = mongodb::bson::to_bson(&json).map_err(|e| ApiError::Serialization(e.to_string()))?;

    let mut doc = match bson {
        Bson::Document(d) => d,
        _ => return Err(ApiError::Serialization("expected a BSON document".into())),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON document back into a serde_json::Value, renaming
/// `_id` → `id`.
fn document_to_json(mut doc: Document) -> Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

fn tour_to_document(tour: &Tour) -> Result<Document, ApiError> {
    let json = serde_json::to_value(tour).map_err(|e| ApiError::Serialization(e.to_string()))?;
    json_to_document(json)
}

fn document_to_tour(doc: Document) -> Result<Tour, ApiError> {
    serde_json::from_value(document_to_json(doc))
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

fn id_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Conjoin the secret-tour exclusion onto a caller-supplied filter.
///
/// Uses `$and` so a caller filter mentioning `secretTour` narrows the
/// result set but can never widen it back to include secret tours.
fn with_visibility(filter: Document) -> Document {
    let hide_secret = doc! { SECRET_TOUR: { "$ne": true } };
    if filter.is_empty() {
        hide_secret
    } else {
        doc! { "$and": [hide_secret, filter] }
    }
}

/// The `$match` stage prepended to every aggregation pipeline.
fn visibility_stage() -> Document {
    doc! { "$match": { SECRET_TOUR: { "$ne": true } } }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match &*error.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// TourRepository
// ---------------------------------------------------------------------------

/// Repository for the `tours` collection.
///
/// Cheap to clone; the underlying driver pools connections internally.
#[derive(Clone, Debug)]
pub struct TourRepository {
    database: Database,
}

impl TourRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(COLLECTION)
    }

    /// Create the unique index on `name`.
    ///
    /// Idempotent; run once at startup before the listener binds.
    pub async fn ensure_indexes(&self) -> Result<(), ApiError> {
        let name_unique = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection().create_index(name_unique).await?;
        Ok(())
    }

    /// Validate and persist a candidate tour document.
    ///
    /// Runs the full creation-scoped schema (every failing field is
    /// reported at once), applies defaults, derives `slug` from `name`,
    /// stamps `createdAt`, and inserts. A duplicate `name` surfaces as
    /// [`ApiError::DuplicateName`].
    pub async fn create(&self, payload: Value) -> Result<Tour, ApiError> {
        let normalized = schema::config()
            .validate(payload, Operation::Create)
            .map_err(ApiError::Validation)?;

        let mut tour: Tour = serde_json::from_value(normalized).map_err(|e| {
            ApiError::Validation(vec![FieldError::new(
                "body",
                format!("Invalid tour payload: {e}"),
            )])
        })?;
        tour.id = Uuid::new_v4();
        tour.slug = slugify(&tour.name);
        tour.created_at = Some(Utc::now());

        let doc = tour_to_document(&tour)?;
        self.collection().insert_one(doc).await.map_err(|error| {
            if is_duplicate_key(&error) {
                ApiError::DuplicateName {
                    name: tour.name.clone(),
                }
            } else {
                ApiError::Storage(error)
            }
        })?;

        // Read back the stored document; creation is a write path, so the
        // visibility filter and createdAt projection do not apply here.
        let stored = self
            .collection()
            .find_one(doc! { "_id": id_bson(&tour.id) })
            .await?
            .ok_or_else(|| ApiError::Serialization("tour not found after insert".into()))?;

        document_to_tour(stored)
    }

    /// Find all visible tours matching the caller-supplied filter.
    pub async fn find(&self, filter: Document) -> Result<Vec<Tour>, ApiError> {
        let cursor = self
            .collection()
            .find(with_visibility(filter))
            .projection(doc! { CREATED_AT: 0 })
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter().map(document_to_tour).collect()
    }

    /// Find one visible tour matching the caller-supplied filter.
    pub async fn find_one(&self, filter: Document) -> Result<Option<Tour>, ApiError> {
        let doc = self
            .collection()
            .find_one(with_visibility(filter))
            .projection(doc! { CREATED_AT: 0 })
            .await?;

        doc.map(document_to_tour).transpose()
    }

    /// Find one visible tour by id.
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Tour>, ApiError> {
        self.find_one(doc! { "_id": id_bson(id) }).await
    }

    /// Apply a partial update to a visible tour.
    ///
    /// Provided fields are validated with update scope (absent fields are
    /// skipped, the creation-only discount rule does not run). A changed
    /// `name` re-derives `slug`.
    pub async fn update(&self, id: &Uuid, payload: Value) -> Result<Tour, ApiError> {
        let normalized = schema::config()
            .validate(payload, Operation::Update)
            .map_err(ApiError::Validation)?;

        let mut changes = match normalized {
            Value::Object(map) => map,
            // validate always returns an object on success
            _ => serde_json::Map::new(),
        };

        let renamed = changes
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(name) = &renamed {
            changes.insert("slug".to_string(), Value::String(slugify(name)));
        }

        if changes.is_empty() {
            return self.require(id).await;
        }

        let update_doc = json_to_document(Value::Object(changes))?;
        let result = self
            .collection()
            .update_one(
                with_visibility(doc! { "_id": id_bson(id) }),
                doc! { "$set": update_doc },
            )
            .await
            .map_err(|error| {
                if is_duplicate_key(&error) {
                    ApiError::DuplicateName {
                        name: renamed.unwrap_or_default(),
                    }
                } else {
                    ApiError::Storage(error)
                }
            })?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound { id: *id });
        }

        // Write-path read back: the tour may have just become secret.
        let stored = self
            .collection()
            .find_one(doc! { "_id": id_bson(id) })
            .await?
            .ok_or(ApiError::NotFound { id: *id })?;

        document_to_tour(stored)
    }

    /// Delete a visible tour by id. Idempotent.
    pub async fn delete(&self, id: &Uuid) -> Result<(), ApiError> {
        self.collection()
            .delete_one(with_visibility(doc! { "_id": id_bson(id) }))
            .await?;
        Ok(())
    }

    /// Run an aggregation pipeline over visible tours.
    ///
    /// The secret-tour `$match` stage is prepended to the caller pipeline,
    /// so no downstream stage ever sees a secret tour.
    pub async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>, ApiError> {
        let mut stages = Vec::with_capacity(pipeline.len() + 1);
        stages.push(visibility_stage());
        stages.extend(pipeline);

        let cursor = self.collection().aggregate(stages).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn require(&self, id: &Uuid) -> Result<Tour, ApiError> {
        self.find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound { id: *id })
    }
}
