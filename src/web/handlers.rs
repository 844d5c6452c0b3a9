use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Result, WebError};
use crate::core::{Bike, UpsertBike};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBikeQuery {
    #[serde(rename = "bikeId")]
    pub bike_id: String,
}

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Unknown `type` values are rejected here, before the manager is called.
pub async fn create_bike(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UpsertBike>, JsonRejection>,
) -> Result<StatusCode> {
    let Json(payload) = payload?;
    state.manager.create(payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bikes(State(state): State<AppState>) -> Result<Json<Vec<Bike>>> {
    let bikes = state.manager.list().await?;
    Ok(Json(bikes))
}

pub async fn get_bike(
    State(state): State<AppState>,
    Path(bike_id): Path<String>,
) -> Result<Json<Bike>> {
    let bike_id = parse_uuid(&bike_id)?;
    let bike = state.manager.get_by_id(bike_id).await?;
    Ok(Json(bike))
}

pub async fn update_bike(
    State(state): State<AppState>,
    Path(bike_id): Path<String>,
    payload: std::result::Result<Json<UpsertBike>, JsonRejection>,
) -> Result<Json<bool>> {
    let bike_id = parse_uuid(&bike_id)?;
    let Json(payload) = payload?;
    let saved = state.manager.update(bike_id, payload).await?;
    Ok(Json(saved))
}

pub async fn delete_bike(
    State(state): State<AppState>,
    query: std::result::Result<Query<DeleteBikeQuery>, QueryRejection>,
) -> Result<Json<bool>> {
    let Query(query) = query?;
    let bike_id = parse_uuid(&query.bike_id)?;
    let deleted = state.manager.delete(bike_id).await?;
    Ok(Json(deleted))
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| WebError::Input(format!("'{}' is not a valid bike id", raw)))
}
