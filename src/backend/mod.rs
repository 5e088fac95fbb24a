use crate::error::AppResult;
use crate::models::Usuario;
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

/// Supported database backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    PostgreSQL,
    SQLite,
}

/// Core data-access abstraction over the `usuarios` and `login` tables.
///
/// Both backends expose the same five operations; where the engines
/// genuinely differ (email uniqueness enforcement) the divergence is
/// surfaced through [`UserStore::supports_unique_constraint`] instead of
/// being papered over.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check if the store is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create the `usuarios` and `login` tables if they do not exist
    async fn init_schema(&self) -> AppResult<()>;

    /// Whether this backend enforces `usuarios.email` uniqueness.
    ///
    /// The PostgreSQL backend carries a UNIQUE constraint and reports
    /// duplicates as [`crate::error::AppError::Duplicate`]; the SQLite
    /// backend has no such constraint (mirroring the original MySQL
    /// deployment) and accepts duplicate emails.
    fn supports_unique_constraint(&self) -> bool;

    /// All usuarios ordered by nome ascending
    async fn list_usuarios(&self) -> AppResult<Vec<Usuario>>;

    /// Insert a usuario and return the engine-generated id
    async fn create_usuario(&self, nome: &str, email: &str) -> AppResult<i64>;

    /// Update a usuario in place; false when the id does not exist
    async fn update_usuario(&self, id: i64, nome: &str, email: &str) -> AppResult<bool>;

    /// Delete a usuario; false when the id does not exist
    async fn delete_usuario(&self, id: i64) -> AppResult<bool>;

    /// Exact-match lookup against the `login` table.
    ///
    /// Returns the stored `usuario` on success. When multiple rows match,
    /// the first row returned by the engine wins; the original system left
    /// that precedence unspecified and so does this one.
    async fn authenticate(&self, usuario: &str, pass: &str) -> AppResult<Option<String>>;
}

/// Factory for creating store instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a store based on configuration
    pub async fn create(
        config: &database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn UserStore>> {
        let store: Box<dyn UserStore> = match config.database_type {
            DatabaseType::PostgreSQL => {
                Box::new(database::postgres::PostgresStore::connect(config).await?)
            }
            DatabaseType::SQLite => {
                Box::new(database::sqlite::SqliteStore::connect(config).await?)
            }
        };
        Ok(Arc::from(store))
    }
}
