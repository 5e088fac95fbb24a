use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::config::DatabaseBackendConfig;
use crate::backend::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::Usuario;

/// PostgreSQL store
///
/// This variant enforces `usuarios.email` uniqueness through the
/// `usuarios_email_key` constraint and translates the engine's
/// unique-violation error (SQLSTATE 23505) into a domain duplicate outcome.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("invalid backend config: {}", e)))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.connection_url)
            .await
            .map_err(|e| AppError::Database(format!("failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Whether an engine error is a violation of the email uniqueness constraint
pub(crate) fn is_unique_violation(code: Option<&str>, constraint: Option<&str>) -> bool {
    code == Some("23505") && constraint == Some("usuarios_email_key")
}

/// Translate a write error into a domain outcome
fn map_write_error(err: sqlx::Error, context: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if is_unique_violation(db_err.code().as_deref(), db_err.constraint()) {
            return AppError::Duplicate("email".to_string());
        }
    }
    AppError::Database(format!("{}: {}", context, err))
}

#[async_trait]
impl UserStore for PostgresStore {
    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("health check failed: {}", e)))?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        let usuarios_sql = r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                id BIGSERIAL PRIMARY KEY,
                nome TEXT NOT NULL,
                email TEXT NOT NULL,
                CONSTRAINT usuarios_email_key UNIQUE (email)
            )
        "#;

        sqlx::query(usuarios_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to create usuarios table: {}", e)))?;

        // Credentials are provisioned externally; this table is read-only
        // from the API's perspective.
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
        true
    }

    async fn list_usuarios(&self) -> AppResult<Vec<Usuario>> {
        sqlx::query_as::<_, Usuario>("SELECT id, nome, email FROM usuarios ORDER BY nome ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to list usuarios: {}", e)))
    }

    async fn create_usuario(&self, nome: &str, email: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO usuarios (nome, email) VALUES ($1, $2) RETURNING id",
        )
        .bind(nome)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "failed to create usuario"))
    }

    async fn update_usuario(&self, id: i64, nome: &str, email: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE usuarios SET nome = $1, email = $2 WHERE id = $3")
            .bind(nome)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "failed to update usuario"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_usuario(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("failed to delete usuario: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn authenticate(&self, usuario: &str, pass: &str) -> AppResult<Option<String>> {
        // Plain-text comparison, faithful to the stored-data contract.
        sqlx::query_scalar::<_, String>(
            "SELECT usuario FROM login WHERE usuario = $1 AND pass = $2",
        )
        .bind(usuario)
        .bind(pass)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("failed to authenticate: {}", e)))
    }
}
