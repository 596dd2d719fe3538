//! The variant catalog for one product.
//!
//! A catalog is fetched fresh for every product-page view and discarded on
//! navigation; nothing here mutates it. Option values are plain string
//! labels (`"8GB"`, `"128GB"`, `"negro"`) compared by exact equality.

use origami_core::{Price, ProductId, VariantId};
use serde::{Deserialize, Serialize};

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    /// RAM label, e.g. `"8GB"`.
    pub memory: String,
    /// Storage label, e.g. `"128GB"`.
    pub storage: String,
    /// Color label, e.g. `"negro"`.
    pub color: String,
    pub unit_price: Price,
    pub stock: u32,
}

/// Product header data shown alongside the variant pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub model: String,
    pub category: String,
    /// `data:` URL built from the API's base64 image payload.
    pub image_url: Option<String>,
}

impl Product {
    /// Display name, e.g. `"Apple iPhone 15"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}

/// Read-only snapshot of a product's variants for one page view.
///
/// Uniqueness of the (memory, storage, color) triple is assumed but not
/// enforced here; duplicated triples make resolution ambiguous and the
/// first match in encounter order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    variants: Vec<Variant>,
}

impl VariantCatalog {
    #[must_use]
    pub const fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variants in catalog-encounter order.
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Distinct memory labels, sorted for display.
    #[must_use]
    pub fn memory_options(&self) -> Vec<String> {
        distinct_sorted(self.variants.iter().map(|v| v.memory.as_str()))
    }

    /// Distinct storage labels, sorted for display.
    #[must_use]
    pub fn storage_options(&self) -> Vec<String> {
        distinct_sorted(self.variants.iter().map(|v| v.storage.as_str()))
    }

    /// Distinct color labels in catalog-encounter order (colors are shown
    /// as swatches and are not sorted).
    #[must_use]
    pub fn color_options(&self) -> Vec<String> {
        distinct(self.variants.iter().map(|v| v.color.as_str()))
    }

    /// Fallback base price: the first variant in encounter order, shown
    /// until the selection resolves.
    #[must_use]
    pub fn base_price(&self) -> Option<Price> {
        self.variants.first().map(|v| v.unit_price)
    }
}

/// Distinct values in encounter order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Distinct values, lexicographically sorted.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out = distinct(values);
    out.sort();
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal::dec;

    /// Test fixture shared by the selection/resolver/page tests.
    pub(crate) fn variant(
        id: i32,
        memory: &str,
        storage: &str,
        color: &str,
        price: i64,
        stock: u32,
    ) -> Variant {
        Variant {
            id: VariantId::new(id),
            product_id: ProductId::new(1),
            memory: memory.to_string(),
            storage: storage.to_string(),
            color: color.to_string(),
            unit_price: Price::from(price),
            stock,
        }
    }

    pub(crate) fn phone_catalog() -> VariantCatalog {
        VariantCatalog::new(vec![
            variant(1, "8GB", "128GB", "negro", 900, 5),
            variant(2, "8GB", "256GB", "negro", 1000, 3),
            variant(3, "8GB", "256GB", "azul", 1050, 0),
            variant(4, "12GB", "256GB", "azul", 1200, 2),
            variant(5, "12GB", "512GB", "negro", 1400, 1),
        ])
    }

    #[test]
    fn test_options_are_distinct() {
        let catalog = phone_catalog();
        assert_eq!(catalog.memory_options(), vec!["12GB", "8GB"]);
        assert_eq!(catalog.storage_options(), vec!["128GB", "256GB", "512GB"]);
        // Encounter order, not sorted
        assert_eq!(catalog.color_options(), vec!["negro", "azul"]);
    }

    #[test]
    fn test_base_price_is_first_variant() {
        let catalog = phone_catalog();
        assert_eq!(catalog.base_price(), Some(Price::new(dec!(900))));
        assert_eq!(VariantCatalog::default().base_price(), None);
    }

    #[test]
    fn test_empty_catalog_has_empty_options() {
        let catalog = VariantCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.memory_options().is_empty());
        assert!(catalog.storage_options().is_empty());
        assert!(catalog.color_options().is_empty());
    }
}
