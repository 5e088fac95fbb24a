use serde::{Deserialize, Serialize};

/// A row of the `usuarios` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

/// Request body for creating or updating a usuario.
///
/// Fields are optional so the handlers can report a 400 for missing or
/// empty values instead of failing deserialization.
#[derive(Debug, Deserialize)]
pub struct UsuarioPayload {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UsuarioPayload {
    /// Both fields present and non-empty, or nothing.
    pub fn fields(&self) -> Option<(&str, &str)> {
        match (self.nome.as_deref(), self.email.as_deref()) {
            (Some(nome), Some(email)) if !nome.is_empty() && !email.is_empty() => {
                Some((nome, email))
            }
            _ => None,
        }
    }
}

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub usuario: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
}

impl LoginPayload {
    pub fn fields(&self) -> Option<(&str, &str)> {
        match (self.usuario.as_deref(), self.pass.as_deref()) {
            (Some(usuario), Some(pass)) if !usuario.is_empty() && !pass.is_empty() => {
                Some((usuario, pass))
            }
            _ => None,
        }
    }
}
