//! Inventario - cache write-through de productos
//!
//! Mantiene un espejo en memoria de la tabla `productos` sobre SQLite:
//! carga completa al construir, mutaciones aplicadas primero en la base
//! y reflejadas en memoria solo cuando la base las confirma.

pub mod cache;
pub mod config;
pub mod database;
pub mod models;
pub mod utils;

pub use cache::Inventario;
pub use config::ConfiguracionEntorno;
pub use models::{CambiosProducto, NuevoProducto, Producto};
pub use utils::AppError;
