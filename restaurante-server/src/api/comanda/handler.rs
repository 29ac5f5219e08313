//! Comanda API Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use shared::models::{Comanda, ComandaCreate};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiPath, AppResult};

/// GET /comanda/todos
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Comanda>>> {
    let comandas = state.comandas.get_all().await?;
    Ok(Json(comandas))
}

/// GET /comanda/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Comanda>> {
    let comanda = state.comandas.find_by_id(id).await?;
    Ok(Json(comanda))
}

/// POST /comanda
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<ComandaCreate>,
) -> AppResult<impl IntoResponse> {
    let comanda = state.comandas.create_comanda(payload).await?;
    let location = format!("/comanda/{}", comanda.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(comanda)))
}

/// PUT /comanda/{id}
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<ComandaCreate>,
) -> AppResult<Json<Comanda>> {
    let comanda = state.comandas.update(id, payload).await?;
    Ok(Json(comanda))
}
