//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct ConfiguracionEntorno {
    pub database_url: String,
    pub max_conexiones: u32,
}

impl ConfiguracionEntorno {
    /// Leer la configuración desde variables de entorno, con valores por defecto
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:inventario.db".to_string()),
            max_conexiones: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Configuración para una base en memoria (tests y pruebas locales)
    pub fn en_memoria() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_conexiones: 1,
        }
    }
}

impl Default for ConfiguracionEntorno {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuracion_en_memoria() {
        let config = ConfiguracionEntorno::en_memoria();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_conexiones, 1);
    }
}
