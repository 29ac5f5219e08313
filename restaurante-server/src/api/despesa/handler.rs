//! Despesa API Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use shared::models::{Despesa, DespesaCreate};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiPath, AppResult};

/// GET /despesa
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Despesa>>> {
    let despesas = state.despesas.get_all_despesas().await?;
    Ok(Json(despesas))
}

/// GET /despesa/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Despesa>> {
    let despesa = state.despesas.find_by_id(id).await?;
    Ok(Json(despesa))
}

/// POST /despesa
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<DespesaCreate>,
) -> AppResult<impl IntoResponse> {
    let despesa = state.despesas.create_despesa(payload).await?;
    let location = format!("/despesa/{}", despesa.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(despesa)))
}

/// PUT /despesa/{id}
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<DespesaCreate>,
) -> AppResult<Json<Despesa>> {
    let despesa = state.despesas.update(id, payload).await?;
    Ok(Json(despesa))
}

/// DELETE /despesa/{id}
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.despesas.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
