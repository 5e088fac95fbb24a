use axum::{http::StatusCode, Json};
use serde_json::json;
use std::fmt;
use tracing::error;

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Configuration(String),
    Internal(String),
    Validation(String),
    NotFound(String),
    Duplicate(String),
    Unauthenticated,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::NotFound(e) => write!(f, "Not found: {}", e),
            AppError::Duplicate(field) => write!(f, "Duplicate value for {}", field),
            AppError::Unauthenticated => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Duplicate(_) => StatusCode::CONFLICT,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    /// Map the error to an HTTP response.
    ///
    /// Internal detail is logged but withheld from the body; client-facing
    /// messages match the original API wire format.
    pub fn to_response(&self) -> (StatusCode, Json<serde_json::Value>) {
        let body = match self {
            AppError::Database(e) => {
                error!("database error: {}", e);
                json!({ "message": "Erro interno do servidor." })
            }
            AppError::Configuration(e) => {
                error!("configuration error: {}", e);
                json!({ "message": "Erro interno do servidor." })
            }
            AppError::Internal(e) => {
                error!("internal error: {}", e);
                json!({ "message": "Erro interno do servidor." })
            }
            AppError::Validation(msg) => json!({ "message": msg }),
            AppError::NotFound(msg) => json!({ "message": msg }),
            AppError::Duplicate(_) => {
                json!({ "message": "Este e-mail já está sendo usado por outro usuário." })
            }
            AppError::Unauthenticated => {
                json!({ "message": "Usuário ou Senha inválidos.", "authenticated": false })
            }
        };

        (self.status_code(), Json(body))
    }
}
