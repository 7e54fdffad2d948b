//! Modelo de Producto
//!
//! Este módulo contiene el struct Producto y sus variantes para operaciones
//! CRUD. Mapea exactamente al schema de la tabla `productos`. El precio se
//! guarda como REAL en SQLite y se normaliza siempre a 2 decimales.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use validator::{Validate, ValidationError};

/// Producto principal - mapea exactamente a la tabla productos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    pub precio: Decimal,
    pub stock: i64,
    pub imagen: Option<String>,
}

impl FromRow<'_, SqliteRow> for Producto {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let precio_bruto: f64 = row.try_get("precio")?;
        let precio = Decimal::from_f64_retain(precio_bruto)
            .ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "precio".to_string(),
                source: format!("valor REAL no representable como decimal: {precio_bruto}").into(),
            })?
            .round_dp(2);

        Ok(Self {
            id: row.try_get("id")?,
            nombre: row.try_get("nombre")?,
            precio,
            stock: row.try_get("stock")?,
            imagen: row.try_get("imagen")?,
        })
    }
}

impl fmt::Display for Producto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Producto(id={}, nombre='{}', precio={}, stock={}, imagen='{}')",
            self.id,
            self.nombre,
            self.precio,
            self.stock,
            self.imagen.as_deref().unwrap_or("")
        )
    }
}

/// Request para agregar un producto nuevo
///
/// El `id` es opcional: si viene, el llamador lo fija; si no, lo asigna
/// la base de datos.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NuevoProducto {
    #[validate(range(min = 1, message = "el id debe ser un entero positivo"))]
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "el nombre debe tener entre 1 y 100 caracteres"))]
    pub nombre: String,

    #[validate(custom = "validar_precio")]
    pub precio: Decimal,

    #[validate(range(min = 0, message = "el stock debe ser 0 o mayor"))]
    pub stock: i64,

    #[validate(length(max = 100, message = "el nombre de imagen no puede superar 100 caracteres"))]
    pub imagen: Option<String>,
}

/// Request para actualizar un producto existente
///
/// Los campos ausentes conservan su valor actual.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CambiosProducto {
    #[validate(length(min = 1, max = 100, message = "el nombre debe tener entre 1 y 100 caracteres"))]
    pub nombre: Option<String>,

    #[validate(custom = "validar_precio")]
    pub precio: Option<Decimal>,

    #[validate(range(min = 0, message = "el stock debe ser 0 o mayor"))]
    pub stock: Option<i64>,

    #[validate(length(max = 100, message = "el nombre de imagen no puede superar 100 caracteres"))]
    pub imagen: Option<String>,
}

fn validar_precio(precio: &Decimal) -> Result<(), ValidationError> {
    if precio.is_sign_negative() {
        let mut error = ValidationError::new("precio_negativo");
        error.message = Some("el precio debe ser 0.00 o mayor".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuevo_valido() -> NuevoProducto {
        NuevoProducto {
            id: None,
            nombre: "Martillo".to_string(),
            precio: "12.50".parse().unwrap(),
            stock: 10,
            imagen: None,
        }
    }

    #[test]
    fn test_nuevo_producto_valido() {
        assert!(nuevo_valido().validate().is_ok());
    }

    #[test]
    fn test_rechaza_nombre_vacio() {
        let mut nuevo = nuevo_valido();
        nuevo.nombre = String::new();
        assert!(nuevo.validate().is_err());
    }

    #[test]
    fn test_rechaza_precio_negativo() {
        let mut nuevo = nuevo_valido();
        nuevo.precio = "-0.01".parse().unwrap();
        assert!(nuevo.validate().is_err());
    }

    #[test]
    fn test_rechaza_stock_negativo() {
        let mut nuevo = nuevo_valido();
        nuevo.stock = -1;
        assert!(nuevo.validate().is_err());
    }

    #[test]
    fn test_rechaza_id_explicito_no_positivo() {
        let mut nuevo = nuevo_valido();
        nuevo.id = Some(0);
        assert!(nuevo.validate().is_err());
    }

    #[test]
    fn test_cambios_vacios_son_validos() {
        assert!(CambiosProducto::default().validate().is_ok());
    }

    #[test]
    fn test_serializa_a_json_para_consumidores() {
        let producto = Producto {
            id: 3,
            nombre: "Clavo".to_string(),
            precio: "0.10".parse().unwrap(),
            stock: 500,
            imagen: Some("clavo.png".to_string()),
        };
        let json = serde_json::to_value(&producto).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["nombre"], "Clavo");
        assert_eq!(json["precio"], "0.10");
        assert_eq!(json["stock"], 500);
        assert_eq!(json["imagen"], "clavo.png");
    }

    #[test]
    fn test_display_sin_imagen() {
        let producto = Producto {
            id: 1,
            nombre: "Martillo".to_string(),
            precio: "12.50".parse().unwrap(),
            stock: 10,
            imagen: None,
        };
        assert_eq!(
            producto.to_string(),
            "Producto(id=1, nombre='Martillo', precio=12.50, stock=10, imagen='')"
        );
    }
}
