//! Cart management commands.
//!
//! # Usage
//!
//! ```bash
//! origami cart add 3 --memory 8GB --storage 256GB --quantity 2
//! origami cart show
//! origami cart increment 1
//! origami cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `ORIGAMI_CART_PATH` - Cart persistence file
//! - `ORIGAMI_WHATSAPP_PHONE` - Number that receives checkout quotes

use origami_core::ProductId;
use origami_storefront::api::{ApiClient, ApiError};
use origami_storefront::cart::{CartError, CartManager, JsonFileStore, whatsapp_quote_url};
use origami_storefront::config::{ConfigError, StoreConfig};
use thiserror::Error;

use super::shop::apply_selection;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Backend fetch failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Cart persistence failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The current selection does not resolve to a purchasable variant.
    #[error("selection is not purchasable (unresolved or out of stock)")]
    NotPurchasable,

    /// The cart show listing does not have the named line.
    #[error("no cart line {0}")]
    NoSuchLine(usize),

    /// Checkout needs a configured phone number.
    #[error("ORIGAMI_WHATSAPP_PHONE is not set")]
    MissingPhone,
}

fn open_cart(config: &StoreConfig) -> Result<CartManager<JsonFileStore>, CartCommandError> {
    Ok(CartManager::open(JsonFileStore::new(
        config.cart_path.clone(),
    ))?)
}

/// Resolve a variant on the product page and add it to the cart.
pub async fn add(
    id: i32,
    memory: Option<String>,
    storage: Option<String>,
    color: Option<String>,
    quantity: u32,
) -> Result<(), CartCommandError> {
    let config = StoreConfig::from_env()?;
    let client = ApiClient::new(&config)?;

    let mut page = client.product_page(ProductId::new(id)).await?;
    apply_selection(&mut page, memory, storage, color);
    // The page clamps to stock on each step, same as clicking "+".
    for _ in 1..quantity {
        page.increment();
    }

    let item = page.add_to_cart_item().ok_or(CartCommandError::NotPurchasable)?;
    let added = format!("{} ({}) x{}", item.display_name, item.meta(), item.quantity);

    let mut cart = open_cart(&config)?;
    cart.add_item(item)?;
    println!("Added {added}");
    println!("Cart: {} item(s), total {}", cart.count(), cart.total());
    Ok(())
}

/// Print the cart contents.
pub fn show() -> Result<(), CartCommandError> {
    let config = StoreConfig::from_env()?;
    let cart = open_cart(&config)?;
    let view = cart.view();

    if view.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }
    for (idx, item) in view.items.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, item.title);
        println!("    {}", item.meta);
        println!(
            "    {} x {} = {}",
            item.unit_price, item.quantity, item.line_total
        );
    }
    println!("\n{} item(s), total {}", view.badge_count, view.total);
    Ok(())
}

/// Bump the quantity of one line (1-based as printed by `show`).
pub fn increment(line: usize) -> Result<(), CartCommandError> {
    with_line(line, |cart, index| cart.increment_item(index))
}

/// Drop the quantity of one line, floored at 1.
pub fn decrement(line: usize) -> Result<(), CartCommandError> {
    with_line(line, |cart, index| cart.decrement_item(index))
}

/// Remove one line.
pub fn remove(line: usize) -> Result<(), CartCommandError> {
    with_line(line, |cart, index| cart.remove_item(index))
}

/// Empty the cart.
pub fn clear() -> Result<(), CartCommandError> {
    let config = StoreConfig::from_env()?;
    let mut cart = open_cart(&config)?;
    cart.clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Print the WhatsApp quote link for the current cart.
pub fn checkout() -> Result<(), CartCommandError> {
    let config = StoreConfig::from_env()?;
    let phone = config
        .whatsapp_phone
        .clone()
        .ok_or(CartCommandError::MissingPhone)?;
    let cart = open_cart(&config)?;
    if cart.items().is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }
    println!("{}", whatsapp_quote_url(&phone, cart.items(), cart.total()));
    Ok(())
}

fn with_line(
    line: usize,
    op: impl FnOnce(&mut CartManager<JsonFileStore>, usize) -> Result<(), CartError>,
) -> Result<(), CartCommandError> {
    let config = StoreConfig::from_env()?;
    let mut cart = open_cart(&config)?;
    let index = line
        .checked_sub(1)
        .filter(|i| *i < cart.items().len())
        .ok_or(CartCommandError::NoSuchLine(line))?;
    op(&mut cart, index)?;
    println!("{} item(s), total {}", cart.count(), cart.total());
    Ok(())
}
