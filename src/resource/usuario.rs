use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::models::{Usuario, UsuarioPayload};

type ErrorResponse = (StatusCode, Json<Value>);

pub async fn list_usuarios(
    State(store): State<AppState>,
) -> Result<Json<Vec<Usuario>>, ErrorResponse> {
    match store.list_usuarios().await {
        Ok(usuarios) => Ok(Json(usuarios)),
        Err(e) => Err(e.to_response()),
    }
}

pub async fn create_usuario(
    State(store): State<AppState>,
    Json(payload): Json<UsuarioPayload>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    let (nome, email) = payload.fields().ok_or_else(|| {
        AppError::Validation("Nome e email são obrigatórios.".to_string()).to_response()
    })?;

    match store.create_usuario(nome, email).await {
        Ok(id) => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Usuário criado com sucesso!", "id": id })),
        )),
        Err(e) => Err(e.to_response()),
    }
}

pub async fn update_usuario(
    State(store): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UsuarioPayload>,
) -> Result<Json<Value>, ErrorResponse> {
    let (nome, email) = payload.fields().ok_or_else(|| {
        AppError::Validation("Nome e email são obrigatórios para atualização.".to_string())
            .to_response()
    })?;

    match store.update_usuario(id, nome, email).await {
        Ok(true) => Ok(Json(json!({ "message": "Usuário atualizado com sucesso!" }))),
        Ok(false) => Err(AppError::NotFound(
            "Usuário não encontrado para atualização.".to_string(),
        )
        .to_response()),
        Err(e) => Err(e.to_response()),
    }
}

pub async fn delete_usuario(
    State(store): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ErrorResponse> {
    match store.delete_usuario(id).await {
        Ok(true) => Ok(Json(json!({ "message": "Usuário apagado com sucesso!" }))),
        Ok(false) => {
            Err(AppError::NotFound("Usuário não encontrado.".to_string()).to_response())
        }
        Err(e) => Err(e.to_response()),
    }
}
