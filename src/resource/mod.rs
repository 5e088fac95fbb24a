use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::backend::UserStore;
use crate::config::CorsConfig;
use crate::error::{AppError, AppResult};

pub mod login;
pub mod usuario;

pub type AppState = Arc<dyn UserStore>;

/// Build the API router with CORS restricted to the configured origin
pub fn app_router(store: AppState, cors: &CorsConfig) -> AppResult<Router> {
    let origin: HeaderValue = cors.allowed_origin.parse().map_err(|_| {
        AppError::Configuration(format!("invalid allowed origin: {}", cors.allowed_origin))
    })?;

    let cors_layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/login", post(login::login))
        .route(
            "/api/usuarios",
            get(usuario::list_usuarios).post(usuario::create_usuario),
        )
        .route(
            "/api/usuarios/{id}",
            put(usuario::update_usuario).delete(usuario::delete_usuario),
        )
        .layer(axum::middleware::from_fn(crate::logging::logging_middleware))
        .layer(cors_layer)
        .with_state(store))
}
