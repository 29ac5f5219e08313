//! Alimento API Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use shared::models::{Alimento, AlimentoCreate, AlimentoUpdate, QuantidadeUpdate};

use crate::core::ServerState;
use crate::utils::{ApiJson, ApiPath, AppResult};

/// GET /alimento/todos
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Alimento>>> {
    let alimentos = state.alimentos.get_all().await?;
    Ok(Json(alimentos))
}

/// GET /alimento/id/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Alimento>> {
    let alimento = state.alimentos.find_by_id(id).await?;
    Ok(Json(alimento))
}

/// GET /alimento/nome/{nome}
pub async fn get_by_nome(
    State(state): State<ServerState>,
    ApiPath(nome): ApiPath<String>,
) -> AppResult<Json<Alimento>> {
    let alimento = state.alimentos.find_by_nome(&nome).await?;
    Ok(Json(alimento))
}

/// POST /alimento
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<AlimentoCreate>,
) -> AppResult<impl IntoResponse> {
    let alimento = state.alimentos.create(payload).await?;
    let location = format!("/alimento/id/{}", alimento.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(alimento)))
}

/// POST /alimento/varios
pub async fn create_multiple(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<Vec<AlimentoCreate>>,
) -> AppResult<(StatusCode, Json<Vec<Alimento>>)> {
    let alimentos = state.alimentos.create_multiple(payload).await?;
    Ok((StatusCode::CREATED, Json(alimentos)))
}

/// PUT /alimento/{nome}
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(nome): ApiPath<String>,
    ApiJson(payload): ApiJson<AlimentoUpdate>,
) -> AppResult<StatusCode> {
    state.alimentos.update(&nome, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /alimento/id/{id}
pub async fn update_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<AlimentoUpdate>,
) -> AppResult<StatusCode> {
    state.alimentos.update_by_id(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /alimento/quantidade/{nome}
pub async fn update_quantidade(
    State(state): State<ServerState>,
    ApiPath(nome): ApiPath<String>,
    ApiJson(payload): ApiJson<QuantidadeUpdate>,
) -> AppResult<StatusCode> {
    state
        .alimentos
        .update_quantidade(&nome, payload.quantidade)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /alimento/{nome}
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(nome): ApiPath<String>,
) -> AppResult<StatusCode> {
    state.alimentos.delete(&nome).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /alimento/id/{id}
pub async fn delete_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.alimentos.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
