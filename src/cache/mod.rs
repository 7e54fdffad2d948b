//! Cache
//!
//! Este módulo contiene el cache en memoria de productos.

pub mod inventario;

pub use inventario::Inventario;
