use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;

use super::config::DatabaseBackendConfig;
use crate::backend::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::Usuario;

/// SQLite store
///
/// Stands in for the original deployment's MySQL variant: the `usuarios`
/// schema carries no uniqueness constraint on `email`, so duplicate emails
/// are accepted and duplicate detection is structurally unavailable. Any
/// write error therefore translates to an internal outcome, never a
/// duplicate one.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("invalid backend config: {}", e)))?;

        // A pooled in-memory database is a separate database per connection,
        // so cap the pool at one connection for `:memory:` URLs.
        let max_connections = if config.connection_url.contains(":memory:") {
            1
        } else {
            config.max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("failed to connect to SQLite: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        // email is deliberately unconstrained, matching the MySQL schema
        // this backend replaces.
        let usuarios_sql = r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                email TEXT NOT NULL
            )
        "#;

        sqlx::query(usuarios_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to create usuarios table: {}", e)))?;

        let login_sql = r#"
            CREATE TABLE IF NOT EXISTS login (
                usuario TEXT NOT NULL,
                pass TEXT NOT NULL
            )
        "#;

        sqlx::query(login_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to create login table: {}", e)))?;

        Ok(())
    }

    fn supports_unique_constraint(&self) -> bool {
        false
    }

    async fn list_usuarios(&self) -> AppResult<Vec<Usuario>> {
        sqlx::query_as::<_, Usuario>("SELECT id, nome, email FROM usuarios ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to list usuarios: {}", e)))
    }

    async fn create_usuario(&self, nome: &str, email: &str) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO usuarios (nome, email) VALUES (?1, ?2)")
            .bind(nome)
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to create usuario: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    async fn update_usuario(&self, id: i64, nome: &str, email: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE usuarios SET nome = ?1, email = ?2 WHERE id = ?3")
            .bind(nome)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to update usuario: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_usuario(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to delete usuario: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn authenticate(&self, usuario: &str, pass: &str) -> AppResult<Option<String>> {
        // Plain-text comparison, faithful to the stored-data contract.
        sqlx::query_scalar::<_, String>(
            "SELECT usuario FROM login WHERE usuario = ?1 AND pass = ?2",
        )
        .bind(usuario)
        .bind(pass)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("failed to authenticate: {}", e)))
    }
}
