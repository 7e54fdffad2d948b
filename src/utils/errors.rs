//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema.
//! Los fallos por operación se devuelven siempre como `Result`, nunca
//! como panic, para que el consumidor pueda mostrar un mensaje al usuario.

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Mensaje corto para mostrar al usuario final
    pub fn mensaje_usuario(&self) -> String {
        match self {
            AppError::Database(_) => "Error al acceder a la base de datos".to_string(),
            AppError::Validation(_) => "Los datos ingresados no son válidos".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mensaje_usuario_no_expone_detalle_sql() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.mensaje_usuario(), "Error al acceder a la base de datos");
    }

    #[test]
    fn test_display_incluye_contexto() {
        let err = AppError::NotFound("no existe un producto con id 7".to_string());
        assert_eq!(err.to_string(), "Not found: no existe un producto con id 7");
    }
}
