//! Conexión a la base de datos
//!
//! Este módulo crea el pool de conexiones SQLite que se inyecta al resto
//! del sistema. Cada operación adquiere una conexión del pool por la
//! duración de una sentencia y la libera en todos los caminos de salida.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::ConfiguracionEntorno;
use crate::utils::errors::AppError;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &ConfiguracionEntorno) -> Result<SqlitePool, AppError> {
    let opciones = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    // Una base en memoria existe solo dentro de su conexión: el pool debe
    // mantener una única conexión viva y nunca rotarla.
    let pool = if es_en_memoria(&config.database_url) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opciones)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_conexiones)
            .connect_with(opciones)
            .await?
    };

    info!("Pool de conexiones creado para {}", config.database_url);
    Ok(pool)
}

fn es_en_memoria(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
