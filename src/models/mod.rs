//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema de la base de datos.

pub mod producto;

pub use producto::{CambiosProducto, NuevoProducto, Producto};
