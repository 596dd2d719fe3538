//! Storefront browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List products, nine per page
//! origami products list --search galaxy --category samsung --page 1
//!
//! # Open a product page and pick options
//! origami products show 3 --memory 8GB --storage 256GB --color negro
//! ```
//!
//! # Environment Variables
//!
//! - `ORIGAMI_API_URL` - Backend API base URL

use origami_core::ProductId;
use origami_storefront::StoreError;
use origami_storefront::api::ApiClient;
use origami_storefront::browse::{BrowseFilter, browse};
use origami_storefront::config::StoreConfig;
use origami_storefront::page::{PageView, ProductPage};
use origami_storefront::selection::AxisOption;

/// List the product grid, filtered and paged.
pub async fn list(
    search: Option<String>,
    category: Option<String>,
    page: usize,
) -> Result<(), StoreError> {
    let config = StoreConfig::from_env()?;
    let client = ApiClient::new(&config)?;

    let cards = client.products().await?;
    let filter = BrowseFilter { search, category };
    let result = browse(&cards, &filter, page);

    if result.cards.is_empty() {
        println!("No products match.");
    }
    for card in &result.cards {
        let price = card
            .base_price
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        println!("{:>4}  {:<40} {:<12} {price}", card.id, card.title, card.category);
    }
    println!(
        "\nPage {} of {}{}",
        result.current_page,
        result.total_pages,
        if result.has_more_pages { "  (more available)" } else { "" }
    );
    Ok(())
}

/// Show one product page with the given options selected.
pub async fn show(
    id: i32,
    memory: Option<String>,
    storage: Option<String>,
    color: Option<String>,
) -> Result<(), StoreError> {
    let config = StoreConfig::from_env()?;
    let client = ApiClient::new(&config)?;

    let mut page = client.product_page(ProductId::new(id)).await?;
    let view = apply_selection(&mut page, memory, storage, color);
    print_view(&view);
    Ok(())
}

/// Apply the requested option picks in axis order. Picks that name a
/// disabled or unknown option are ignored, same as a click would be.
pub fn apply_selection(
    page: &mut ProductPage,
    memory: Option<String>,
    storage: Option<String>,
    color: Option<String>,
) -> PageView {
    if let Some(m) = memory {
        page.select_memory(&m);
    }
    if let Some(s) = storage {
        page.select_storage(&s);
    }
    if let Some(c) = color {
        page.select_color(&c);
    }
    page.recompute()
}

/// Render a product page view to stdout.
pub fn print_view(view: &PageView) {
    println!("{}", view.title);
    println!("{}", "=".repeat(view.title.len()));
    print_axis("RAM", &view.axes.memory, view.memory.as_deref());
    print_axis("Storage", &view.axes.storage, view.storage.as_deref());
    print_axis("Color", &view.axes.color, view.color.as_deref());
    println!();
    println!("Unit price: {}", view.unit_price);
    match view.stock {
        Some(0) => println!("Out of stock"),
        Some(n) => println!("In stock: {n}"),
        None => println!("Pick all options to see availability"),
    }
    println!("Quantity: {}   Total: {}", view.quantity, view.total);
    if !view.purchase_enabled {
        println!("(purchase disabled)");
    }
}

fn print_axis(label: &str, options: &[AxisOption], selected: Option<&str>) {
    let rendered: Vec<String> = options
        .iter()
        .map(|o| {
            if Some(o.value.as_str()) == selected {
                format!("[{}]", o.value)
            } else if o.enabled {
                o.value.clone()
            } else {
                format!("({})", o.value)
            }
        })
        .collect();
    println!("{label:>8}: {}", rendered.join("  "));
}
