//! Esquema de la tabla de productos
//!
//! Verificación idempotente al arranque: crea la tabla si no existe y
//! añade la columna `imagen` cuando la tabla proviene de una versión
//! anterior que no la tenía. El cache asume este esquema como precondición.

use sqlx::SqlitePool;
use tracing::info;

use crate::utils::errors::AppError;

/// Crear la tabla `productos` si no existe y completar columnas faltantes
pub async fn asegurar_esquema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS productos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nombre TEXT NOT NULL,
            precio REAL NOT NULL,
            stock INTEGER NOT NULL,
            imagen TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Tablas creadas por versiones previas no tienen la columna imagen
    let (columnas,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM pragma_table_info('productos') WHERE name = 'imagen'",
    )
    .fetch_one(pool)
    .await?;

    if columnas == 0 {
        sqlx::query("ALTER TABLE productos ADD COLUMN imagen TEXT")
            .execute(pool)
            .await?;
        info!("Columna 'imagen' añadida a la tabla 'productos'");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfiguracionEntorno;
    use crate::database::connection::create_pool;

    #[tokio::test]
    async fn test_esquema_es_idempotente() {
        let pool = create_pool(&ConfiguracionEntorno::en_memoria()).await.unwrap();

        asegurar_esquema(&pool).await.unwrap();
        asegurar_esquema(&pool).await.unwrap();

        sqlx::query("INSERT INTO productos (nombre, precio, stock, imagen) VALUES ('Tornillo', 0.10, 500, NULL)")
            .execute(&pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_tabla_anterior_gana_columna_imagen() {
        let pool = create_pool(&ConfiguracionEntorno::en_memoria()).await.unwrap();

        sqlx::query(
            r#"
            CREATE TABLE productos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nombre TEXT NOT NULL,
                precio REAL NOT NULL,
                stock INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        asegurar_esquema(&pool).await.unwrap();

        sqlx::query("INSERT INTO productos (nombre, precio, stock, imagen) VALUES ('Taladro', 89.99, 3, 'taladro.png')")
            .execute(&pool)
            .await
            .unwrap();
    }
}
