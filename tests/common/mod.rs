use axum::Router;
use std::sync::Arc;
use usuarios_server::backend::database::{DatabaseBackendConfig, SqliteStore};
use usuarios_server::backend::{DatabaseType, UserStore};
use usuarios_server::config::CorsConfig;
use usuarios_server::resource::app_router;

/// Create an in-memory SQLite store with the schema applied
pub async fn setup_test_store() -> Result<SqliteStore, Box<dyn std::error::Error>> {
    let backend_config = DatabaseBackendConfig {
        database_type: DatabaseType::SQLite,
        connection_url: ":memory:".to_string(),
        max_connections: 1,
        connection_timeout: 30,
    };

    let store = SqliteStore::connect(&backend_config).await?;
    store.init_schema().await?;
    Ok(store)
}

/// Create a test app backed by an in-memory SQLite store
pub async fn setup_test_app() -> Result<Router, Box<dyn std::error::Error>> {
    setup_test_app_with_login(&[]).await
}

/// Create a test app with the given credential rows pre-provisioned.
///
/// The API exposes no route for managing the `login` table, so tests seed
/// it directly, the way an operator would.
pub async fn setup_test_app_with_login(
    rows: &[(&str, &str)],
) -> Result<Router, Box<dyn std::error::Error>> {
    let store = setup_test_store().await?;

    for (usuario, pass) in rows {
        sqlx::query("INSERT INTO login (usuario, pass) VALUES (?1, ?2)")
            .bind(usuario)
            .bind(pass)
            .execute(store.pool())
            .await?;
    }

    let store: Arc<dyn UserStore> = Arc::new(store);
    Ok(app_router(store, &CorsConfig::default())?)
}
