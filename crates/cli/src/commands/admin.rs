//! Back-office catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! origami admin login -p <password>
//! origami admin product list
//! origami admin variant create --product-id 3 --memory 8GB \
//!     --storage 256GB --color negro --price 899.99 --stock 5
//! ```
//!
//! # Environment Variables
//!
//! - `ORIGAMI_API_URL` - Backend API base URL
//! - `ORIGAMI_ADMIN_USER` / `ORIGAMI_ADMIN_PASSWORD` - Accepted credentials
//! - `ORIGAMI_ADMIN_SESSION_PATH` - Persisted session file

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use origami_admin::types::{CategoryPayload, ProductPayload, VariantPayload};
use origami_admin::{AdminClient, AdminConfig, AdminError};
use rust_decimal::Decimal;

fn client() -> Result<AdminClient, AdminError> {
    AdminClient::new(AdminConfig::from_env()?)
}

/// Log in and persist a session.
pub fn login(username: Option<&str>, password: &str) -> Result<(), AdminError> {
    let config = AdminConfig::from_env()?;
    let username = username.unwrap_or(&config.username).to_string();
    let session = AdminClient::new(config)?.login(&username, password)?;
    println!("Logged in as {}; session valid until {}", session.username, session.expires_at);
    Ok(())
}

/// Drop the persisted session.
pub fn logout() -> Result<(), AdminError> {
    client()?.logout()?;
    println!("Logged out.");
    Ok(())
}

/// List all products.
pub async fn list_products() -> Result<(), AdminError> {
    let products = client()?.products().await?;
    for p in &products {
        println!(
            "{:>4}  {} {}  [{}]",
            p.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            p.marca.as_deref().unwrap_or("-"),
            p.modelo.as_deref().unwrap_or("-"),
            p.categoria.as_deref().unwrap_or("-"),
        );
    }
    println!("\n{} product(s)", products.len());
    Ok(())
}

/// Create a product.
pub async fn create_product(
    brand: &str,
    model: &str,
    category: &str,
    image: Option<&Path>,
) -> Result<(), AdminError> {
    let payload = product_payload(None, brand, model, category, image)?;
    client()?.create_product(&payload).await?;
    println!("Created product {brand} {model}");
    Ok(())
}

/// Update a product.
pub async fn update_product(
    id: i32,
    brand: &str,
    model: &str,
    category: &str,
    image: Option<&Path>,
) -> Result<(), AdminError> {
    let payload = product_payload(Some(id), brand, model, category, image)?;
    client()?.update_product(id, &payload).await?;
    println!("Updated product {id}");
    Ok(())
}

/// Delete a product.
pub async fn delete_product(id: i32) -> Result<(), AdminError> {
    client()?.delete_product(id).await?;
    println!("Deleted product {id}");
    Ok(())
}

/// List all categories.
pub async fn list_categories() -> Result<(), AdminError> {
    let categories = client()?.categories().await?;
    for c in &categories {
        println!(
            "{:>4}  {:<20} {}",
            c.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            c.nombre.as_deref().unwrap_or("-"),
            c.descripcion.as_deref().unwrap_or(""),
        );
    }
    println!("\n{} categorie(s)", categories.len());
    Ok(())
}

/// Create a category.
pub async fn create_category(name: &str, description: &str) -> Result<(), AdminError> {
    let payload = CategoryPayload {
        id: None,
        nombre: name.to_string(),
        descripcion: description.to_string(),
    };
    client()?.create_category(&payload).await?;
    println!("Created category {name}");
    Ok(())
}

/// Update a category.
pub async fn update_category(id: i32, name: &str, description: &str) -> Result<(), AdminError> {
    let payload = CategoryPayload {
        id: Some(id),
        nombre: name.to_string(),
        descripcion: description.to_string(),
    };
    client()?.update_category(id, &payload).await?;
    println!("Updated category {id}");
    Ok(())
}

/// Delete a category.
pub async fn delete_category(id: i32) -> Result<(), AdminError> {
    client()?.delete_category(id).await?;
    println!("Deleted category {id}");
    Ok(())
}

/// List one product's variants.
pub async fn list_variants(product_id: i32) -> Result<(), AdminError> {
    let variants = client()?.variants(product_id).await?;
    for v in &variants {
        println!(
            "{:>4}  {} / {} / {}  {}  stock {}",
            v.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            v.ram.as_deref().unwrap_or("-"),
            v.almacenamiento.as_deref().unwrap_or("-"),
            v.color.as_deref().unwrap_or("-"),
            v.precio.map_or_else(|| "-".to_string(), |p| p.to_string()),
            v.stock.unwrap_or(0),
        );
    }
    println!("\n{} variant(s)", variants.len());
    Ok(())
}

/// Show one variant.
pub async fn show_variant(id: i32) -> Result<(), AdminError> {
    let v = client()?.variant(id).await?;
    println!("Variant {id}");
    println!("  product: {}", v.producto_id.map_or_else(|| "-".to_string(), |p| p.to_string()));
    println!("  RAM:     {}", v.ram.as_deref().unwrap_or("-"));
    println!("  storage: {}", v.almacenamiento.as_deref().unwrap_or("-"));
    println!("  color:   {}", v.color.as_deref().unwrap_or("-"));
    println!("  price:   {}", v.precio.map_or_else(|| "-".to_string(), |p| p.to_string()));
    println!("  stock:   {}", v.stock.unwrap_or(0));
    if let Some(created) = v.created_at {
        println!("  created: {created}");
    }
    Ok(())
}

/// Create a variant.
pub async fn create_variant(
    product_id: i32,
    memory: &str,
    storage: &str,
    color: &str,
    price: Decimal,
    stock: u32,
) -> Result<(), AdminError> {
    let payload = variant_payload(None, product_id, memory, storage, color, price, stock);
    client()?.create_variant(&payload).await?;
    println!("Created variant for product {product_id}");
    Ok(())
}

/// Update a variant.
#[allow(clippy::too_many_arguments)]
pub async fn update_variant(
    id: i32,
    product_id: i32,
    memory: &str,
    storage: &str,
    color: &str,
    price: Decimal,
    stock: u32,
) -> Result<(), AdminError> {
    let payload = variant_payload(Some(id), product_id, memory, storage, color, price, stock);
    client()?.update_variant(id, &payload).await?;
    println!("Updated variant {id}");
    Ok(())
}

/// Delete a variant.
pub async fn delete_variant(id: i32) -> Result<(), AdminError> {
    client()?.delete_variant(id).await?;
    println!("Deleted variant {id}");
    Ok(())
}

fn product_payload(
    id: Option<i32>,
    brand: &str,
    model: &str,
    category: &str,
    image: Option<&Path>,
) -> Result<ProductPayload, AdminError> {
    let img = match image {
        Some(path) => Some(BASE64.encode(std::fs::read(path)?)),
        None => None,
    };
    Ok(ProductPayload {
        id,
        marca: brand.to_string(),
        modelo: model.to_string(),
        categoria: category.to_string(),
        img,
    })
}

fn variant_payload(
    id: Option<i32>,
    product_id: i32,
    memory: &str,
    storage: &str,
    color: &str,
    price: Decimal,
    stock: u32,
) -> VariantPayload {
    VariantPayload {
        id,
        producto_id: product_id,
        ram: memory.to_string(),
        almacenamiento: storage.to_string(),
        color: color.to_string(),
        precio: price,
        stock,
    }
}
