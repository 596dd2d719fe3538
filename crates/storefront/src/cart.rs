//! Cart state and persistence.
//!
//! The cart is the only state this crate persists: an ordered list of line
//! items, re-serialized as a whole under the well-known `cart_items` key on
//! every mutation. Each line carries the price and stock captured when it
//! was added; live stock is not re-queried afterwards, so the stock
//! snapshot bounds later quantity edits.
//!
//! Views of the same cart stay consistent through a revision channel:
//! every mutation bumps a `tokio::sync::watch` counter, and another view
//! holding a receiver re-reads the store via [`CartManager::refresh`].
//! Concurrent edits from two views are last-write-wins with no merging.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use origami_core::{Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::warn;

/// Key under which the cart is persisted.
pub const CART_STORAGE_KEY: &str = "cart_items";

/// Cart persistence errors.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("cart store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One entry in the cart: a chosen variant with add-time snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub display_name: String,
    pub memory: String,
    pub storage: String,
    pub color: String,
    /// Price snapshot at add-time.
    pub unit_price: Price,
    pub quantity: u32,
    /// Stock snapshot at add-time; bounds quantity edits.
    pub stock: u32,
    pub image_url: Option<String>,
}

impl LineItem {
    /// `"8GB · 128GB · negro"`, the meta line under the item title.
    #[must_use]
    pub fn meta(&self) -> String {
        format!("{} · {} · {}", self.memory, self.storage, self.color)
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Durable key-value style store backing the cart.
pub trait CartStore: Send + Sync {
    /// Load the persisted item list. A missing entry is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when the underlying store cannot be read.
    fn load(&self) -> Result<Vec<LineItem>, CartError>;

    /// Persist the whole item list, replacing the previous value.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when the underlying store cannot be written.
    fn save(&self, items: &[LineItem]) -> Result<(), CartError>;
}

/// JSON file store - the durable local key-value store of the storefront.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Vec<LineItem>, CartError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let payload = fs::read_to_string(&self.path)?;
        // A malformed payload degrades to an empty cart rather than
        // wedging every page load on a poisoned store.
        match serde_json::from_str(&payload) {
            Ok(items) => Ok(items),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding unreadable cart payload");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string(items)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Vec<LineItem>>,
}

impl CartStore for MemoryStore {
    fn load(&self) -> Result<Vec<LineItem>, CartError> {
        let guard = self
            .items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, items: &[LineItem]) -> Result<(), CartError> {
        let mut guard = self
            .items
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = items.to_vec();
        Ok(())
    }
}

/// Cart display data for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub badge_count: u32,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub title: String,
    pub meta: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image_url: Option<String>,
}

/// The cart state manager: ordered line items plus their persisted store.
///
/// All operations are synchronous; every mutation re-serializes the whole
/// cart and bumps the revision channel.
pub struct CartManager<S: CartStore> {
    store: S,
    items: Vec<LineItem>,
    revision: watch::Sender<u64>,
}

impl<S: CartStore> CartManager<S> {
    /// Open the cart, loading whatever the store currently holds.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when the store cannot be read.
    pub fn open(store: S) -> Result<Self, CartError> {
        let items = store.load()?;
        let (revision, _) = watch::channel(0);
        Ok(Self {
            store,
            items,
            revision,
        })
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add a line item, merging with an existing line for the same
    /// variant. On merge the quantities are summed and clamped to the
    /// EXISTING entry's stock snapshot; the existing price and metadata
    /// snapshots stay authoritative.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when persisting fails.
    pub fn add_item(&mut self, item: LineItem) -> Result<&[LineItem], CartError> {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.variant_id == item.variant_id)
        {
            Some(existing) => {
                existing.quantity = (existing.quantity + item.quantity).min(existing.stock);
            }
            None => self.items.push(item),
        }
        self.persist()?;
        Ok(&self.items)
    }

    /// Bump the quantity of the entry at `index`, clamped to its stock
    /// snapshot. Out-of-range indices are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when persisting fails.
    pub fn increment_item(&mut self, index: usize) -> Result<(), CartError> {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = (item.quantity + 1).min(item.stock.max(1));
            self.persist()?;
        }
        Ok(())
    }

    /// Drop the quantity of the entry at `index`, floored at 1. Never
    /// removes the entry; removal is its own action. Out-of-range indices
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when persisting fails.
    pub fn decrement_item(&mut self, index: usize) -> Result<(), CartError> {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = item.quantity.saturating_sub(1).max(1);
            self.persist()?;
        }
        Ok(())
    }

    /// Delete the entry at `index`. Out-of-range indices are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when persisting fails.
    pub fn remove_item(&mut self, index: usize) -> Result<(), CartError> {
        if index < self.items.len() {
            self.items.remove(index);
            self.persist()?;
        }
        Ok(())
    }

    /// Empty the cart. Only ever triggered by an explicit user action.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when persisting fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.items.clear();
        self.persist()
    }

    /// Sum of all quantities (the badge number).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|it| it.quantity).sum()
    }

    /// Sum of `unit_price × quantity` over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Re-read the store, picking up writes from other views of the same
    /// cart. Bumps the revision so this view's renderers repaint.
    ///
    /// # Errors
    ///
    /// Returns `CartError` when the store cannot be read.
    pub fn refresh(&mut self) -> Result<(), CartError> {
        self.items = self.store.load()?;
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }

    /// Subscribe to cart changes. The received value is a monotonically
    /// increasing revision; re-render on every change notification.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Renderable snapshot of the whole cart.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView {
            items: self
                .items
                .iter()
                .map(|it| CartItemView {
                    title: it.display_name.clone(),
                    meta: it.meta(),
                    unit_price: it.unit_price.to_string(),
                    quantity: it.quantity,
                    line_total: it.line_total().to_string(),
                    image_url: it.image_url.clone(),
                })
                .collect(),
            total: self.total().to_string(),
            badge_count: self.count(),
        }
    }

    fn persist(&mut self) -> Result<(), CartError> {
        self.store.save(&self.items)?;
        self.revision.send_modify(|rev| *rev += 1);
        Ok(())
    }
}

/// Build the WhatsApp quote URL for the current cart, the storefront's
/// checkout. `phone` is the receiving number with country code, no `+`.
#[must_use]
pub fn whatsapp_quote_url(phone: &str, items: &[LineItem], total: Price) -> String {
    let mut message =
        String::from("Hola, quisiera hacer un pedido: 🛒 *Mi Lista de Productos*\n\n");
    for (idx, it) in items.iter().enumerate() {
        message.push_str(&format!("{}. *{}*\n", idx + 1, it.display_name));
        message.push_str(&format!("   📱 {}\n", it.meta()));
        message.push_str(&format!(
            "   💰 {} x {} = {}\n\n",
            it.unit_price,
            it.quantity,
            it.line_total()
        ));
    }
    message.push_str(&format!("*Total: {total}*\n\n"));
    message.push_str("¡Espero tu respuesta! 😊");

    format!("https://wa.me/{phone}?text={}", urlencoding::encode(&message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use origami_core::{ProductId, VariantId};

    fn item(variant_id: i32, quantity: u32, stock: u32, price: i64) -> LineItem {
        LineItem {
            product_id: ProductId::new(1),
            variant_id: VariantId::new(variant_id),
            display_name: "Apple iPhone 15".to_string(),
            memory: "8GB".to_string(),
            storage: "128GB".to_string(),
            color: "negro".to_string(),
            unit_price: Price::from(price),
            quantity,
            stock,
            image_url: None,
        }
    }

    fn manager() -> CartManager<MemoryStore> {
        CartManager::open(MemoryStore::default()).expect("open cart")
    }

    #[test]
    fn test_add_merges_by_variant_id() {
        // Scenario C: two adds of the same variant make one line.
        let mut cart = manager();
        cart.add_item(item(1, 1, 5, 900)).expect("add");
        cart.add_item(item(1, 2, 5, 900)).expect("add");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_merge_clamps_to_existing_stock_snapshot() {
        let mut cart = manager();
        cart.add_item(item(1, 2, 3, 900)).expect("add");
        // Incoming claims more stock; the existing snapshot wins.
        cart.add_item(item(1, 4, 99, 950)).expect("add");
        assert_eq!(cart.items()[0].quantity, 3);
        // Price snapshot of the first add stays authoritative too.
        assert_eq!(cart.items()[0].unit_price, Price::from(900));
    }

    #[test]
    fn test_distinct_variants_append() {
        let mut cart = manager();
        cart.add_item(item(1, 1, 5, 900)).expect("add");
        cart.add_item(item(2, 1, 5, 1000)).expect("add");
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), Price::from(1900));
    }

    #[test]
    fn test_decrement_at_one_is_a_noop() {
        // Scenario D: decrementing a quantity-1 line keeps it.
        let mut cart = manager();
        cart.add_item(item(1, 1, 5, 900)).expect("add");
        cart.decrement_item(0).expect("decrement");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_increment_caps_at_stock_snapshot() {
        let mut cart = manager();
        cart.add_item(item(1, 1, 2, 900)).expect("add");
        cart.increment_item(0).expect("increment");
        cart.increment_item(0).expect("increment");
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_and_out_of_range_noop() {
        let mut cart = manager();
        cart.add_item(item(1, 1, 5, 900)).expect("add");
        cart.remove_item(7).expect("out of range is a no-op");
        assert_eq!(cart.items().len(), 1);
        cart.remove_item(0).expect("remove");
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_mutations_notify_subscribers() {
        let mut cart = manager();
        let rx = cart.subscribe();
        assert_eq!(*rx.borrow(), 0);
        cart.add_item(item(1, 1, 5, 900)).expect("add");
        assert_eq!(*rx.borrow(), 1);
        cart.increment_item(0).expect("increment");
        assert_eq!(*rx.borrow(), 2);
    }

    #[test]
    fn test_serialization_round_trip() {
        let items = vec![item(1, 2, 5, 900), item(2, 1, 3, 1000)];
        let payload = serde_json::to_string(&items).expect("serialize");
        let back: Vec<LineItem> = serde_json::from_str(&payload).expect("deserialize");
        assert_eq!(items, back);
    }

    #[test]
    fn test_view_formats_prices() {
        let mut cart = manager();
        cart.add_item(item(1, 2, 5, 1299)).expect("add");
        let view = cart.view();
        assert_eq!(view.badge_count, 2);
        assert_eq!(view.total, "$2,598");
        assert_eq!(view.items[0].meta, "8GB · 128GB · negro");
        assert_eq!(view.items[0].line_total, "$2,598");
    }

    #[test]
    fn test_whatsapp_quote_url_encodes_message() {
        let items = vec![item(1, 2, 5, 900)];
        let url = whatsapp_quote_url("5491122334455", &items, Price::from(1800));
        assert!(url.starts_with("https://wa.me/5491122334455?text="));
        assert!(url.contains("Mi%20Lista%20de%20Productos"));
        // Item lines carry "unit x qty = total"
        assert!(url.contains(&urlencoding::encode("$900 x 2 = $1,800").into_owned()));
    }
}
