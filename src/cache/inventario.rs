//! Cache de inventario de productos
//!
//! Mantiene en memoria el mapa id → Producto espejado contra la tabla
//! `productos`. Escritura write-through: cada mutación se aplica primero
//! en la base y se refleja en memoria solo si la base la confirmó, así el
//! mapa nunca contiene una fila sin confirmar. La inversa no se garantiza:
//! filas agregadas a la tabla por fuera de esta instancia no se cargan.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::models::{CambiosProducto, NuevoProducto, Producto};
use crate::utils::errors::AppError;

/// Cache write-through de productos
///
/// Una instancia por proceso, construida al arranque e inyectada a los
/// consumidores. El pool de conexiones entra por construcción; cada
/// sentencia adquiere una conexión y la libera al terminar.
pub struct Inventario {
    pool: SqlitePool,
    productos: RwLock<HashMap<i64, Producto>>,
}

impl Inventario {
    /// Cargar el inventario completo desde la base
    ///
    /// Falla si la lectura inicial falla: el cache no puede usarse a medio
    /// cargar, el llamador debe tratar el error como inventario no disponible.
    pub async fn cargar(pool: SqlitePool) -> Result<Self, AppError> {
        let filas =
            sqlx::query_as::<_, Producto>("SELECT id, nombre, precio, stock, imagen FROM productos")
                .fetch_all(&pool)
                .await
                .map_err(|e| {
                    error!("Error al cargar productos: {}", e);
                    AppError::Database(e)
                })?;

        let productos: HashMap<i64, Producto> = filas.into_iter().map(|p| (p.id, p)).collect();
        info!("Inventario cargado: {} productos", productos.len());

        Ok(Self {
            pool,
            productos: RwLock::new(productos),
        })
    }

    /// Agregar un producto
    ///
    /// Con `id` explícito ya residente en memoria devuelve `Conflict` sin
    /// tocar la base. Sin `id`, adopta el que asigne la base. Devuelve el
    /// id del producto agregado.
    pub async fn agregar(&self, nuevo: NuevoProducto) -> Result<i64, AppError> {
        nuevo.validate().map_err(|e| {
            warn!("Producto rechazado por validación: {}", e);
            AppError::Validation(e)
        })?;
        let precio = nuevo.precio.round_dp(2);

        // El guard de escritura cubre chequeo, INSERT y espejo: dos
        // inserciones concurrentes del mismo id no pueden pasar ambas
        // el chequeo de existencia.
        let mut productos = self.productos.write().await;

        let id = match nuevo.id {
            Some(id) => {
                if productos.contains_key(&id) {
                    warn!("Inserción rechazada: id {} ya existe en el inventario", id);
                    return Err(AppError::Conflict(format!(
                        "ya existe un producto con id {id}"
                    )));
                }
                sqlx::query(
                    "INSERT INTO productos (id, nombre, precio, stock, imagen) VALUES (?, ?, ?, ?, ?)",
                )
                .bind(id)
                .bind(&nuevo.nombre)
                .bind(precio.to_f64().unwrap_or_default())
                .bind(nuevo.stock)
                .bind(&nuevo.imagen)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!("Error al agregar producto {}: {}", id, e);
                    AppError::Database(e)
                })?;
                id
            }
            None => {
                let resultado = sqlx::query(
                    "INSERT INTO productos (nombre, precio, stock, imagen) VALUES (?, ?, ?, ?)",
                )
                .bind(&nuevo.nombre)
                .bind(precio.to_f64().unwrap_or_default())
                .bind(nuevo.stock)
                .bind(&nuevo.imagen)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    error!("Error al agregar producto: {}", e);
                    AppError::Database(e)
                })?;
                resultado.last_insert_rowid()
            }
        };

        productos.insert(
            id,
            Producto {
                id,
                nombre: nuevo.nombre,
                precio,
                stock: nuevo.stock,
                imagen: nuevo.imagen,
            },
        );
        debug!("Producto {} agregado al inventario", id);
        Ok(id)
    }

    /// Actualizar campos de un producto existente
    ///
    /// Los campos ausentes en `cambios` conservan su valor actual. La
    /// existencia se decide solo contra la memoria: un id no cargado se
    /// trata como inexistente sin consultar la base.
    pub async fn actualizar(&self, id: i64, cambios: CambiosProducto) -> Result<(), AppError> {
        cambios.validate().map_err(|e| {
            warn!("Actualización rechazada por validación: {}", e);
            AppError::Validation(e)
        })?;

        let mut productos = self.productos.write().await;
        let actual = productos.get(&id).ok_or_else(|| {
            warn!("Actualización rechazada: id {} no existe en el inventario", id);
            AppError::NotFound(format!("no existe un producto con id {id}"))
        })?;

        let nombre = cambios.nombre.unwrap_or_else(|| actual.nombre.clone());
        let precio = cambios.precio.map(|p| p.round_dp(2)).unwrap_or(actual.precio);
        let stock = cambios.stock.unwrap_or(actual.stock);
        let imagen = cambios.imagen.or_else(|| actual.imagen.clone());

        sqlx::query("UPDATE productos SET nombre = ?, precio = ?, stock = ?, imagen = ? WHERE id = ?")
            .bind(&nombre)
            .bind(precio.to_f64().unwrap_or_default())
            .bind(stock)
            .bind(&imagen)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Error al actualizar producto {}: {}", id, e);
                AppError::Database(e)
            })?;

        productos.insert(
            id,
            Producto {
                id,
                nombre,
                precio,
                stock,
                imagen,
            },
        );
        debug!("Producto {} actualizado", id);
        Ok(())
    }

    /// Eliminar un producto
    ///
    /// Un id ausente de memoria devuelve `NotFound` sin tocar la base.
    pub async fn eliminar(&self, id: i64) -> Result<(), AppError> {
        let mut productos = self.productos.write().await;
        if !productos.contains_key(&id) {
            warn!("Eliminación rechazada: id {} no existe en el inventario", id);
            return Err(AppError::NotFound(format!("no existe un producto con id {id}")));
        }

        sqlx::query("DELETE FROM productos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Error al eliminar producto {}: {}", id, e);
                AppError::Database(e)
            })?;

        productos.remove(&id);
        debug!("Producto {} eliminado del inventario", id);
        Ok(())
    }

    /// Buscar productos cuyo nombre contiene el patrón
    ///
    /// Consulta siempre la base, sin pasar por la memoria ni actualizarla.
    /// La sensibilidad a mayúsculas depende de la collation de la base.
    pub async fn buscar_por_nombre(&self, patron: &str) -> Result<Vec<Producto>, AppError> {
        let like = format!("%{}%", patron);
        sqlx::query_as::<_, Producto>(
            "SELECT id, nombre, precio, stock, imagen FROM productos WHERE nombre LIKE ?",
        )
        .bind(&like)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Error al buscar productos por nombre: {}", e);
            AppError::Database(e)
        })
    }

    /// Listar los productos residentes en memoria, ordenados por id
    ///
    /// No consulta la base: puede divergir de la tabla si esta se modificó
    /// por fuera de la instancia.
    pub async fn listar_todos(&self) -> Vec<Producto> {
        let productos = self.productos.read().await;
        let mut lista: Vec<Producto> = productos.values().cloned().collect();
        lista.sort_by_key(|p| p.id);
        lista
    }

    /// Obtener un producto por id desde la memoria, sin fallback a la base
    pub async fn obtener(&self, id: i64) -> Option<Producto> {
        self.productos.read().await.get(&id).cloned()
    }
}
