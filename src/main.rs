use anyhow::Result;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inventario::cache::Inventario;
use inventario::config::ConfiguracionEntorno;
use inventario::database::{asegurar_esquema, create_pool};
use inventario::models::{CambiosProducto, NuevoProducto};

type Entrada = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("📦 Inventario - gestión de productos");
    info!("====================================");

    let config = ConfiguracionEntorno::from_env();
    let pool = match create_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Precondición del cache: tabla y columnas presentes
    asegurar_esquema(&pool).await?;

    let inventario = match Inventario::cargar(pool).await {
        Ok(inventario) => {
            info!("✅ Inventario cargado");
            inventario
        }
        Err(e) => {
            error!("❌ Error cargando el inventario: {}", e);
            return Err(anyhow::anyhow!("Inventario no disponible: {}", e));
        }
    };

    menu(&inventario).await?;

    info!("👋 Inventario cerrado");
    Ok(())
}

async fn menu(inventario: &Inventario) -> Result<()> {
    let mut lineas = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!();
        println!("--- Menú de Inventario ---");
        println!("1. Agregar producto");
        println!("2. Eliminar producto");
        println!("3. Actualizar producto");
        println!("4. Buscar producto por nombre");
        println!("5. Mostrar todos los productos");
        println!("6. Salir");

        let opcion = match leer(&mut lineas, "Seleccione una opción: ").await {
            Ok(opcion) => opcion,
            Err(_) => break,
        };

        match opcion.as_str() {
            "1" => agregar(inventario, &mut lineas).await?,
            "2" => eliminar(inventario, &mut lineas).await?,
            "3" => actualizar(inventario, &mut lineas).await?,
            "4" => buscar(inventario, &mut lineas).await?,
            "5" => listar(inventario).await,
            "6" => {
                println!("Saliendo...");
                break;
            }
            _ => println!("Opción no válida."),
        }
    }

    Ok(())
}

async fn agregar(inventario: &Inventario, lineas: &mut Entrada) -> Result<()> {
    let id = leer(lineas, "ID (enter para asignar automáticamente): ").await?;
    let id = if id.is_empty() {
        None
    } else {
        match id.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                println!("ID no válido.");
                return Ok(());
            }
        }
    };

    let nombre = leer(lineas, "Nombre: ").await?;
    let Some(precio) = leer_decimal(lineas, "Precio: ").await? else {
        return Ok(());
    };
    let Some(stock) = leer_entero(lineas, "Stock: ").await? else {
        return Ok(());
    };
    let imagen = leer(lineas, "Imagen (enter para ninguna): ").await?;
    let imagen = (!imagen.is_empty()).then_some(imagen);

    let nuevo = NuevoProducto {
        id,
        nombre,
        precio,
        stock,
        imagen,
    };
    match inventario.agregar(nuevo).await {
        Ok(id) => println!("Producto agregado con id {id}."),
        Err(e) => println!("No se pudo agregar: {}", e.mensaje_usuario()),
    }
    Ok(())
}

async fn eliminar(inventario: &Inventario, lineas: &mut Entrada) -> Result<()> {
    let Some(id) = leer_entero(lineas, "ID del producto a eliminar: ").await? else {
        return Ok(());
    };
    match inventario.eliminar(id).await {
        Ok(()) => println!("Producto eliminado."),
        Err(e) => println!("No se pudo eliminar: {}", e.mensaje_usuario()),
    }
    Ok(())
}

async fn actualizar(inventario: &Inventario, lineas: &mut Entrada) -> Result<()> {
    let Some(id) = leer_entero(lineas, "ID del producto a actualizar: ").await? else {
        return Ok(());
    };

    let nombre = leer(lineas, "Nuevo nombre (enter para mantener): ").await?;
    let precio = leer(lineas, "Nuevo precio (enter para mantener): ").await?;
    let stock = leer(lineas, "Nuevo stock (enter para mantener): ").await?;
    let imagen = leer(lineas, "Nueva imagen (enter para mantener): ").await?;

    let precio = if precio.is_empty() {
        None
    } else {
        match precio.parse::<Decimal>() {
            Ok(valor) => Some(valor),
            Err(_) => {
                println!("Precio no válido.");
                return Ok(());
            }
        }
    };
    let stock = if stock.is_empty() {
        None
    } else {
        match stock.parse::<i64>() {
            Ok(valor) => Some(valor),
            Err(_) => {
                println!("Stock no válido.");
                return Ok(());
            }
        }
    };

    let cambios = CambiosProducto {
        nombre: (!nombre.is_empty()).then_some(nombre),
        precio,
        stock,
        imagen: (!imagen.is_empty()).then_some(imagen),
    };
    match inventario.actualizar(id, cambios).await {
        Ok(()) => println!("Producto actualizado."),
        Err(e) => println!("No se pudo actualizar: {}", e.mensaje_usuario()),
    }
    Ok(())
}

async fn buscar(inventario: &Inventario, lineas: &mut Entrada) -> Result<()> {
    let patron = leer(lineas, "Nombre a buscar: ").await?;
    match inventario.buscar_por_nombre(&patron).await {
        Ok(productos) if productos.is_empty() => println!("No se encontraron productos."),
        Ok(productos) => {
            for producto in productos {
                println!("{producto}");
            }
        }
        Err(e) => println!("No se pudo buscar: {}", e.mensaje_usuario()),
    }
    Ok(())
}

async fn listar(inventario: &Inventario) {
    let productos = inventario.listar_todos().await;
    if productos.is_empty() {
        println!("Inventario vacío.");
        return;
    }
    for producto in productos {
        println!("{producto}");
    }
}

async fn leer(lineas: &mut Entrada, prompt: &str) -> Result<String> {
    use std::io::Write;

    print!("{prompt}");
    std::io::stdout().flush()?;
    match lineas.next_line().await? {
        Some(linea) => Ok(linea.trim().to_string()),
        None => Err(anyhow::anyhow!("entrada estándar cerrada")),
    }
}

async fn leer_entero(lineas: &mut Entrada, prompt: &str) -> Result<Option<i64>> {
    let texto = leer(lineas, prompt).await?;
    match texto.parse() {
        Ok(valor) => Ok(Some(valor)),
        Err(_) => {
            println!("Número no válido.");
            Ok(None)
        }
    }
}

async fn leer_decimal(lineas: &mut Entrada, prompt: &str) -> Result<Option<Decimal>> {
    let texto = leer(lineas, prompt).await?;
    match texto.parse() {
        Ok(valor) => Ok(Some(valor)),
        Err(_) => {
            println!("Número no válido.");
            Ok(None)
        }
    }
}
