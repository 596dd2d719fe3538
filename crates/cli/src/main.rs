//! Origami CLI - the store's buying surface and back-office from the
//! terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the listing (searchable, paged nine per screen)
//! origami products list --search iphone --page 2
//!
//! # Open a product page with a variant selection
//! origami products show 3 --memory 8GB --storage 256GB
//!
//! # Add the resolved variant to the cart
//! origami cart add 3 --memory 8GB --storage 256GB --color negro --quantity 2
//!
//! # Review and check out via WhatsApp quote
//! origami cart show
//! origami cart checkout
//!
//! # Back-office catalog management
//! origami admin login -p <password>
//! origami admin product list
//! ```
//!
//! # Commands
//!
//! - `products` - Browse the product listing
//! - `cart` - Manage the persisted cart
//! - `admin` - Manage the catalog through the back-office API

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "origami")]
#[command(author, version, about = "Origami store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product listing
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Back-office catalog management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, filtered and paged
    List {
        /// Case-insensitive substring match on the product title
        #[arg(short, long)]
        search: Option<String>,

        /// Exact category (brand) filter
        #[arg(short, long)]
        category: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show one product page with its option grid and pricing
    Show {
        /// Product ID
        id: i32,

        /// RAM option to select (e.g. `8GB`)
        #[arg(long)]
        memory: Option<String>,

        /// Storage option to select (e.g. `256GB`)
        #[arg(long)]
        storage: Option<String>,

        /// Color swatch to select
        #[arg(long)]
        color: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Resolve a variant and add it to the cart
    Add {
        /// Product ID
        id: i32,

        /// RAM option (defaults to the first displayed)
        #[arg(long)]
        memory: Option<String>,

        /// Storage option (defaults to the first displayed)
        #[arg(long)]
        storage: Option<String>,

        /// Color swatch (defaults to the first displayed)
        #[arg(long)]
        color: Option<String>,

        /// Quantity, clamped to the variant's stock
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show the cart contents and total
    Show,
    /// Bump the quantity of one cart line
    Increment {
        /// 1-based line number as shown by `cart show`
        line: usize,
    },
    /// Drop the quantity of one cart line (floors at 1)
    Decrement {
        /// 1-based line number as shown by `cart show`
        line: usize,
    },
    /// Remove one cart line
    Remove {
        /// 1-based line number as shown by `cart show`
        line: usize,
    },
    /// Empty the cart
    Clear,
    /// Print the WhatsApp quote link for the current cart
    Checkout,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Log in and persist an eight-hour session
    Login {
        /// Username (defaults to the configured admin user)
        #[arg(short, long)]
        username: Option<String>,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Drop the persisted session
    Logout,
    /// Product management
    Product {
        #[command(subcommand)]
        action: AdminProductAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: AdminCategoryAction,
    },
    /// Variant management
    Variant {
        #[command(subcommand)]
        action: AdminVariantAction,
    },
}

#[derive(Subcommand)]
enum AdminProductAction {
    /// List all products
    List,
    /// Create a product
    Create {
        /// Brand (e.g. `Apple`)
        #[arg(long)]
        brand: String,

        /// Model (e.g. `iPhone 15`)
        #[arg(long)]
        model: String,

        /// Category label
        #[arg(long)]
        category: String,

        /// Path of a product image to upload
        #[arg(long)]
        image: Option<std::path::PathBuf>,
    },
    /// Update a product
    Update {
        /// Product ID
        id: i32,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        model: String,

        #[arg(long)]
        category: String,

        /// Path of a product image to upload
        #[arg(long)]
        image: Option<std::path::PathBuf>,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: i32,
    },
}

#[derive(Subcommand)]
enum AdminCategoryAction {
    /// List all categories
    List,
    /// Create a category
    Create {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update a category
    Update {
        /// Category ID
        id: i32,

        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category
    Delete {
        /// Category ID
        id: i32,
    },
}

#[derive(Subcommand)]
enum AdminVariantAction {
    /// List one product's variants
    List {
        /// Product ID
        product_id: i32,
    },
    /// Show one variant
    Show {
        /// Variant ID
        id: i32,
    },
    /// Create a variant
    Create {
        /// Owning product ID
        #[arg(long)]
        product_id: i32,

        /// RAM label (e.g. `8GB`)
        #[arg(long)]
        memory: String,

        /// Storage label (e.g. `256GB`)
        #[arg(long)]
        storage: String,

        #[arg(long)]
        color: String,

        /// Unit price (e.g. `899.99`)
        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        stock: u32,
    },
    /// Update a variant
    Update {
        /// Variant ID
        id: i32,

        /// Owning product ID
        #[arg(long)]
        product_id: i32,

        #[arg(long)]
        memory: String,

        #[arg(long)]
        storage: String,

        #[arg(long)]
        color: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        stock: u32,
    },
    /// Delete a variant
    Delete {
        /// Variant ID
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                page,
            } => commands::shop::list(search, category, page).await?,
            ProductAction::Show {
                id,
                memory,
                storage,
                color,
            } => commands::shop::show(id, memory, storage, color).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                memory,
                storage,
                color,
                quantity,
            } => commands::cart::add(id, memory, storage, color, quantity).await?,
            CartAction::Show => commands::cart::show()?,
            CartAction::Increment { line } => commands::cart::increment(line)?,
            CartAction::Decrement { line } => commands::cart::decrement(line)?,
            CartAction::Remove { line } => commands::cart::remove(line)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Checkout => commands::cart::checkout()?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { username, password } => {
                commands::admin::login(username.as_deref(), &password)?;
            }
            AdminAction::Logout => commands::admin::logout()?,
            AdminAction::Product { action } => match action {
                AdminProductAction::List => commands::admin::list_products().await?,
                AdminProductAction::Create {
                    brand,
                    model,
                    category,
                    image,
                } => {
                    commands::admin::create_product(&brand, &model, &category, image.as_deref())
                        .await?;
                }
                AdminProductAction::Update {
                    id,
                    brand,
                    model,
                    category,
                    image,
                } => {
                    commands::admin::update_product(id, &brand, &model, &category, image.as_deref())
                        .await?;
                }
                AdminProductAction::Delete { id } => commands::admin::delete_product(id).await?,
            },
            AdminAction::Category { action } => match action {
                AdminCategoryAction::List => commands::admin::list_categories().await?,
                AdminCategoryAction::Create { name, description } => {
                    commands::admin::create_category(&name, &description).await?;
                }
                AdminCategoryAction::Update {
                    id,
                    name,
                    description,
                } => commands::admin::update_category(id, &name, &description).await?,
                AdminCategoryAction::Delete { id } => commands::admin::delete_category(id).await?,
            },
            AdminAction::Variant { action } => match action {
                AdminVariantAction::List { product_id } => {
                    commands::admin::list_variants(product_id).await?;
                }
                AdminVariantAction::Show { id } => commands::admin::show_variant(id).await?,
                AdminVariantAction::Create {
                    product_id,
                    memory,
                    storage,
                    color,
                    price,
                    stock,
                } => {
                    commands::admin::create_variant(product_id, &memory, &storage, &color, price, stock)
                        .await?;
                }
                AdminVariantAction::Update {
                    id,
                    product_id,
                    memory,
                    storage,
                    color,
                    price,
                    stock,
                } => {
                    commands::admin::update_variant(
                        id, product_id, &memory, &storage, &color, price, stock,
                    )
                    .await?;
                }
                AdminVariantAction::Delete { id } => commands::admin::delete_variant(id).await?,
            },
        },
    }
    Ok(())
}
