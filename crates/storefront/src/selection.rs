//! Option filtering and selection repair.
//!
//! Memory is the root of the selection hierarchy and is never filtered by
//! the other axes. Storage is filtered by the selected memory. Colors are
//! filtered only once BOTH memory and storage are chosen; with either
//! unset, every color stays selectable (color is deliberately the
//! least-constraining axis, not a general rule).
//!
//! Repair is synchronous: by the time [`filter_options`] returns, the
//! selection only holds values inside their reachable sets, so a renderer
//! can never show the active option as disabled.

use serde::{Deserialize, Serialize};

use crate::catalog::VariantCatalog;

/// The user's current, page-local pick. Reset on every page load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub memory: Option<String>,
    pub storage: Option<String>,
    pub color: Option<String>,
    /// Chosen quantity; clamped by the pricing engine, not here.
    pub quantity: u32,
}

impl Selection {
    /// Initial selection for a freshly loaded page: the first displayed
    /// option on each axis, quantity 1. Empty catalogs select nothing.
    #[must_use]
    pub fn default_for(catalog: &VariantCatalog) -> Self {
        Self {
            memory: catalog.memory_options().into_iter().next(),
            storage: catalog.storage_options().into_iter().next(),
            color: catalog.color_options().into_iter().next(),
            quantity: 1,
        }
    }

    /// All three axes picked.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.memory.is_some() && self.storage.is_some() && self.color.is_some()
    }
}

/// One selectable option button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisOption {
    pub value: String,
    pub enabled: bool,
}

/// Per-axis option lists with enabled/disabled flags, ready to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisOptions {
    pub memory: Vec<AxisOption>,
    pub storage: Vec<AxisOption>,
    pub color: Vec<AxisOption>,
}

/// Recompute per-axis reachable sets and repair the selection in place.
///
/// An unreachable storage value is replaced by the first reachable one in
/// catalog-encounter order, then colors are re-evaluated against the
/// repaired storage; same encounter-order rule for an unreachable color.
/// An empty catalog yields empty option lists and leaves the selection
/// untouched.
pub fn filter_options(catalog: &VariantCatalog, selection: &mut Selection) -> AxisOptions {
    if catalog.is_empty() {
        return AxisOptions::default();
    }

    // Memory axis is never filtered.
    let memory = catalog
        .memory_options()
        .into_iter()
        .map(|value| AxisOption {
            value,
            enabled: true,
        })
        .collect();

    let reachable_storage = reachable_storage(catalog, selection.memory.as_deref());
    repair_axis(&mut selection.storage, &reachable_storage, || {
        first_reachable_storage(catalog, selection.memory.as_deref())
    });
    let storage = mark(catalog.storage_options(), &reachable_storage);

    let reachable_color = reachable_colors(
        catalog,
        selection.memory.as_deref(),
        selection.storage.as_deref(),
    );
    repair_axis(&mut selection.color, &reachable_color, || {
        first_reachable_color(
            catalog,
            selection.memory.as_deref(),
            selection.storage.as_deref(),
        )
    });
    let color = mark(catalog.color_options(), &reachable_color);

    AxisOptions {
        memory,
        storage,
        color,
    }
}

/// Storage labels reachable under the selected memory; all of them when
/// memory is unset.
fn reachable_storage(catalog: &VariantCatalog, memory: Option<&str>) -> Vec<String> {
    memory.map_or_else(
        || catalog.storage_options(),
        |mem| {
            let mut out = Vec::new();
            for v in catalog.variants().iter().filter(|v| v.memory == mem) {
                if !out.iter().any(|s| s == &v.storage) {
                    out.push(v.storage.clone());
                }
            }
            out
        },
    )
}

/// Color labels reachable under the selected (memory, storage) pair; all
/// colors unless both are set.
fn reachable_colors(
    catalog: &VariantCatalog,
    memory: Option<&str>,
    storage: Option<&str>,
) -> Vec<String> {
    match (memory, storage) {
        (Some(mem), Some(sto)) => {
            let mut out = Vec::new();
            for v in catalog
                .variants()
                .iter()
                .filter(|v| v.memory == mem && v.storage == sto)
            {
                if !out.iter().any(|c| c == &v.color) {
                    out.push(v.color.clone());
                }
            }
            out
        }
        _ => catalog.color_options(),
    }
}

/// First reachable storage in catalog-encounter order.
fn first_reachable_storage(catalog: &VariantCatalog, memory: Option<&str>) -> Option<String> {
    catalog
        .variants()
        .iter()
        .find(|v| memory.is_none_or(|mem| v.memory == mem))
        .map(|v| v.storage.clone())
}

/// First reachable color in catalog-encounter order.
fn first_reachable_color(
    catalog: &VariantCatalog,
    memory: Option<&str>,
    storage: Option<&str>,
) -> Option<String> {
    match (memory, storage) {
        (Some(mem), Some(sto)) => catalog
            .variants()
            .iter()
            .find(|v| v.memory == mem && v.storage == sto)
            .map(|v| v.color.clone()),
        _ => catalog.variants().first().map(|v| v.color.clone()),
    }
}

/// Replace an out-of-reach axis value with the encounter-order fallback.
fn repair_axis(
    current: &mut Option<String>,
    reachable: &[String],
    fallback: impl FnOnce() -> Option<String>,
) {
    if let Some(value) = current.as_deref()
        && !reachable.iter().any(|r| r == value)
    {
        *current = fallback();
    }
}

/// Flag each displayed option with whether it is reachable.
fn mark(options: Vec<String>, reachable: &[String]) -> Vec<AxisOption> {
    options
        .into_iter()
        .map(|value| {
            let enabled = reachable.iter().any(|r| r == &value);
            AxisOption { value, enabled }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::phone_catalog;
    use crate::resolver::resolve;

    fn selection(memory: &str, storage: &str, color: &str) -> Selection {
        Selection {
            memory: Some(memory.to_string()),
            storage: Some(storage.to_string()),
            color: Some(color.to_string()),
            quantity: 1,
        }
    }

    #[test]
    fn test_memory_axis_never_filtered() {
        let catalog = phone_catalog();
        let mut sel = selection("12GB", "256GB", "azul");
        let axes = filter_options(&catalog, &mut sel);
        assert!(axes.memory.iter().all(|o| o.enabled));
    }

    #[test]
    fn test_storage_filtered_by_memory() {
        let catalog = phone_catalog();
        let mut sel = selection("12GB", "256GB", "azul");
        let axes = filter_options(&catalog, &mut sel);
        let enabled: Vec<_> = axes
            .storage
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.value.as_str())
            .collect();
        // 12GB comes in 256GB and 512GB only
        assert_eq!(enabled, vec!["256GB", "512GB"]);
    }

    #[test]
    fn test_colors_unfiltered_until_memory_and_storage_set() {
        let catalog = phone_catalog();
        let mut sel = Selection {
            memory: Some("8GB".to_string()),
            storage: None,
            color: Some("azul".to_string()),
            quantity: 1,
        };
        let axes = filter_options(&catalog, &mut sel);
        assert!(axes.color.iter().all(|o| o.enabled));
        // No repair happened either
        assert_eq!(sel.color.as_deref(), Some("azul"));
    }

    #[test]
    fn test_colors_filtered_when_both_set() {
        let catalog = phone_catalog();
        let mut sel = selection("8GB", "128GB", "negro");
        let axes = filter_options(&catalog, &mut sel);
        let enabled: Vec<_> = axes
            .color
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(enabled, vec!["negro"]);
    }

    #[test]
    fn test_storage_repair_uses_encounter_order() {
        let catalog = phone_catalog();
        // 12GB has no 128GB variant; first 12GB variant in encounter order
        // carries 256GB.
        let mut sel = selection("12GB", "128GB", "negro");
        filter_options(&catalog, &mut sel);
        assert_eq!(sel.storage.as_deref(), Some("256GB"));
    }

    #[test]
    fn test_color_repair_follows_repaired_storage() {
        let catalog = phone_catalog();
        // After storage repairs to 256GB, (12GB, 256GB) only comes in azul.
        let mut sel = selection("12GB", "128GB", "negro");
        filter_options(&catalog, &mut sel);
        assert_eq!(sel.color.as_deref(), Some("azul"));
    }

    #[test]
    fn test_active_values_always_enabled_after_repair() {
        let catalog = phone_catalog();
        let mut sel = selection("12GB", "128GB", "negro");
        let axes = filter_options(&catalog, &mut sel);
        for (axis, value) in [
            (&axes.storage, sel.storage.as_deref()),
            (&axes.color, sel.color.as_deref()),
        ] {
            let value = value.expect("repaired value");
            assert!(
                axis.iter().any(|o| o.value == value && o.enabled),
                "active value {value} must be enabled"
            );
        }
    }

    #[test]
    fn test_empty_catalog_reports_empty_axes() {
        let catalog = VariantCatalog::default();
        let mut sel = Selection::default_for(&catalog);
        let axes = filter_options(&catalog, &mut sel);
        assert!(axes.memory.is_empty());
        assert!(axes.storage.is_empty());
        assert!(axes.color.is_empty());
        assert!(sel.memory.is_none());
    }

    /// Any triple drawn from the reachable sets just computed must resolve.
    #[test]
    fn test_reachable_selection_always_resolves() {
        let catalog = phone_catalog();
        for mem in catalog.memory_options() {
            let mut probe = Selection {
                memory: Some(mem.clone()),
                storage: None,
                color: None,
                quantity: 1,
            };
            filter_options(&catalog, &mut probe);
            for sto in reachable_storage(&catalog, Some(&mem)) {
                for col in reachable_colors(&catalog, Some(&mem), Some(&sto)) {
                    let sel = selection(&mem, &sto, &col);
                    assert!(
                        resolve(&catalog, &sel).is_some(),
                        "({mem}, {sto}, {col}) drawn from reachable sets must resolve"
                    );
                }
            }
        }
    }
}
