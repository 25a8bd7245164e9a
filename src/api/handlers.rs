use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::BackendError;
use crate::model::{
    Horse, HorseCreate, HorseSearch, HorseUpdate, Id, Owner, OwnerCreate, OwnerSearch,
    PedigreeNode,
};
use crate::store::traits::Backend;

pub type AppState<S> = Arc<S>;

pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Error body; `errors` lists every failed validation rule.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PedigreeQuery {
    #[serde(rename = "maxGenerations")]
    pub max_generations: Option<u32>,
}

fn reject(err: BackendError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status())
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!("Request failed: {}", err);
    }
    let body = match err {
        BackendError::Validation { message, errors } | BackendError::Conflict { message, errors } => {
            ErrorResponse { message, errors }
        }
        other => ErrorResponse::new(&other.to_string()),
    };
    (status, Json(body))
}

// Horse endpoints

pub async fn list_horses<S: Backend>(
    State(store): State<AppState<S>>,
    Query(search): Query<HorseSearch>,
) -> ApiResult<Json<Vec<Horse>>> {
    let horses = if search.is_unfiltered() {
        store.list_horses().await
    } else {
        store.search_horses(&search).await
    };
    horses.map(Json).map_err(reject)
}

pub async fn get_horse<S: Backend>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<Horse>> {
    store.get_horse(id).await.map(Json).map_err(reject)
}

pub async fn create_horse<S: Backend>(
    State(store): State<AppState<S>>,
    RequestJson(horse): RequestJson<HorseCreate>,
) -> ApiResult<(StatusCode, Json<Horse>)> {
    store
        .create_horse(&horse)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(reject)
}

pub async fn update_horse<S: Backend>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    RequestJson(horse): RequestJson<HorseUpdate>,
) -> ApiResult<Json<Horse>> {
    store.update_horse(id, &horse).await.map(Json).map_err(reject)
}

pub async fn delete_horse<S: Backend>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    store
        .delete_horse(id)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(reject)
}

pub async fn get_pedigree<S: Backend>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
    Query(query): Query<PedigreeQuery>,
) -> ApiResult<Json<PedigreeNode>> {
    store
        .get_pedigree(id, query.max_generations)
        .await
        .map(Json)
        .map_err(reject)
}

// Owner endpoints

pub async fn search_owners<S: Backend>(
    State(store): State<AppState<S>>,
    Query(search): Query<OwnerSearch>,
) -> ApiResult<Json<Vec<Owner>>> {
    store.search_owners(&search).await.map(Json).map_err(reject)
}

pub async fn get_owner<S: Backend>(
    State(store): State<AppState<S>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<Owner>> {
    store.get_owner(id).await.map(Json).map_err(reject)
}

pub async fn create_owner<S: Backend>(
    State(store): State<AppState<S>>,
    RequestJson(owner): RequestJson<OwnerCreate>,
) -> ApiResult<(StatusCode, Json<Owner>)> {
    store
        .create_owner(&owner)
        .await
        .map(|created| (StatusCode::CREATED, Json(created)))
        .map_err(reject)
}
