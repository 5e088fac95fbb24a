//! Database layer for the usuarios API
//!
//! One contract, two engines:
//!
//! ```text
//! UserStore trait (backend/mod.rs)
//!     ├── postgres/ (PgPool, UNIQUE email, 23505 -> Duplicate)
//!     └── sqlite/   (SqlitePool, no uniqueness, insert errors -> Internal)
//! ```

pub mod config;
pub mod postgres;
pub mod sqlite;

// Re-export key types for convenience
pub use config::DatabaseBackendConfig;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;
