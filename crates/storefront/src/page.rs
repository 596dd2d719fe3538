//! The product-page state machine: pricing, quantity, and control state.
//!
//! Holds the catalog snapshot and the current selection, and recomputes the
//! whole renderable view after every input. Rendering lives elsewhere; the
//! page only produces [`PageView`] values.

use origami_core::Price;
use tracing::warn;

use crate::cart::LineItem;
use crate::catalog::{Product, VariantCatalog};
use crate::resolver::resolve;
use crate::selection::{AxisOptions, Selection, filter_options};

/// Product detail page state.
#[derive(Debug, Clone)]
pub struct ProductPage {
    product: Product,
    catalog: VariantCatalog,
    selection: Selection,
}

/// Everything the rendering collaborator needs for one paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub image_url: Option<String>,
    /// Per-axis option buttons with enabled/disabled flags.
    pub axes: AxisOptions,
    pub memory: Option<String>,
    pub storage: Option<String>,
    pub color: Option<String>,
    /// Resolved variant's price, or the fallback base price while the
    /// selection is incomplete. Zero only for an empty catalog.
    pub unit_price: Price,
    pub total: Price,
    pub quantity: u32,
    /// Stock of the resolved variant; `None` while unresolved.
    pub stock: Option<u32>,
    pub purchase_enabled: bool,
    pub increment_enabled: bool,
    pub decrement_enabled: bool,
}

impl ProductPage {
    /// Build the page for a freshly fetched product and catalog. The
    /// selection defaults to the first displayed option per axis.
    #[must_use]
    pub fn new(product: Product, catalog: VariantCatalog) -> Self {
        let selection = Selection::default_for(&catalog);
        Self {
            product,
            catalog,
            selection,
        }
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    /// Pick a memory option. Ignored unless the value is one of the
    /// rendered buttons (memory buttons are never disabled).
    pub fn select_memory(&mut self, value: &str) -> PageView {
        if self.catalog.memory_options().iter().any(|m| m == value) {
            self.selection.memory = Some(value.to_string());
        }
        self.recompute()
    }

    /// Pick a storage option. Clicks on disabled buttons are ignored.
    pub fn select_storage(&mut self, value: &str) -> PageView {
        if self.axis_enabled(value, Axis::Storage) {
            self.selection.storage = Some(value.to_string());
        }
        self.recompute()
    }

    /// Pick a color swatch. Clicks on disabled swatches are ignored.
    pub fn select_color(&mut self, value: &str) -> PageView {
        if self.axis_enabled(value, Axis::Color) {
            self.selection.color = Some(value.to_string());
        }
        self.recompute()
    }

    /// Bump quantity by one, clamped to the resolved variant's stock.
    /// No-op at the ceiling, while unresolved, or at zero stock.
    pub fn increment(&mut self) -> PageView {
        if let Some(stock) = resolve(&self.catalog, &self.selection).map(|v| v.stock)
            && stock > 0
        {
            self.selection.quantity = (self.selection.quantity + 1).min(stock);
        }
        self.recompute()
    }

    /// Drop quantity by one, floored at 1. No-op at the floor, while
    /// unresolved, or at zero stock.
    pub fn decrement(&mut self) -> PageView {
        if let Some(stock) = resolve(&self.catalog, &self.selection).map(|v| v.stock)
            && stock > 0
        {
            self.selection.quantity = self.selection.quantity.saturating_sub(1).max(1);
        }
        self.recompute()
    }

    /// Recompute the full view: repair the selection, resolve the variant,
    /// clamp the quantity, and derive prices and control state.
    ///
    /// Calling this twice with no intervening input yields identical
    /// output.
    pub fn recompute(&mut self) -> PageView {
        let axes = filter_options(&self.catalog, &mut self.selection);
        let resolved = resolve(&self.catalog, &self.selection);

        if resolved.is_none() && self.selection.is_complete() && !self.catalog.is_empty() {
            // Complete selection with no matching variant means the source
            // data is inconsistent. Treated as unresolved, but telemetry
            // gets the details.
            warn!(
                product_id = %self.product.id,
                memory = self.selection.memory.as_deref(),
                storage = self.selection.storage.as_deref(),
                color = self.selection.color.as_deref(),
                "complete selection matches no catalog variant"
            );
        }

        let stock = resolved.map(|v| v.stock);
        match stock {
            Some(0) => self.selection.quantity = 0,
            Some(n) => self.selection.quantity = self.selection.quantity.clamp(1, n),
            None => self.selection.quantity = self.selection.quantity.max(1),
        }

        // The fallback base price is only meaningful while the selection is
        // incomplete; resolution failure on a complete selection also falls
        // back, per the inconsistent-data handling above.
        let unit_price = resolved
            .map(|v| v.unit_price)
            .or_else(|| self.catalog.base_price())
            .unwrap_or(Price::ZERO);

        let quantity = self.selection.quantity;
        let purchase_enabled = stock.is_some_and(|n| n > 0);

        PageView {
            title: self.product.display_name(),
            image_url: self.product.image_url.clone(),
            axes,
            memory: self.selection.memory.clone(),
            storage: self.selection.storage.clone(),
            color: self.selection.color.clone(),
            unit_price,
            total: unit_price.times(quantity),
            quantity,
            stock,
            purchase_enabled,
            increment_enabled: stock.is_some_and(|n| n > 0 && quantity < n),
            decrement_enabled: stock.is_some_and(|n| n > 0 && quantity > 1),
        }
    }

    /// Snapshot the current selection as a cart line item. `None` while
    /// purchase is disabled.
    pub fn add_to_cart_item(&mut self) -> Option<LineItem> {
        self.recompute();
        let variant = resolve(&self.catalog, &self.selection)?;
        if variant.stock == 0 {
            return None;
        }
        Some(LineItem {
            product_id: self.product.id,
            variant_id: variant.id,
            display_name: self.product.display_name(),
            memory: variant.memory.clone(),
            storage: variant.storage.clone(),
            color: variant.color.clone(),
            unit_price: variant.unit_price,
            quantity: self.selection.quantity,
            stock: variant.stock,
            image_url: self.product.image_url.clone(),
        })
    }

    fn axis_enabled(&self, value: &str, axis: Axis) -> bool {
        let mut probe = self.selection.clone();
        let axes = filter_options(&self.catalog, &mut probe);
        let options = match axis {
            Axis::Storage => &axes.storage,
            Axis::Color => &axes.color,
        };
        options.iter().any(|o| o.value == value && o.enabled)
    }
}

enum Axis {
    Storage,
    Color,
}
