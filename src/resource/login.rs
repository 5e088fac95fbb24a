use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;
use crate::models::LoginPayload;

type ErrorResponse = (StatusCode, Json<Value>);

pub async fn login(
    State(store): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>, ErrorResponse> {
    let (usuario, pass) = payload.fields().ok_or_else(|| {
        AppError::Validation("Usuário e Senha são obrigatórios.".to_string()).to_response()
    })?;

    match store.authenticate(usuario, pass).await {
        Ok(Some(usuario)) => Ok(Json(json!({
            "message": "Login bem-sucedido!",
            "authenticated": true,
            "usuario": usuario,
        }))),
        Ok(None) => Err(AppError::Unauthenticated.to_response()),
        Err(e) => Err(e.to_response()),
    }
}
