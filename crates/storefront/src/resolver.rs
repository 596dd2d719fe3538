//! Selection-to-variant resolution.

use crate::catalog::{Variant, VariantCatalog};
use crate::selection::Selection;

/// Find the variant matching a complete selection.
///
/// A variant matches iff all three axis values are set and equal (exact
/// string comparison) to the candidate's labels. `None` means "incomplete
/// selection or no exact match" and callers must treat it as no price, no
/// stock, purchase disabled - never as a zero price.
#[must_use]
pub fn resolve<'a>(catalog: &'a VariantCatalog, selection: &Selection) -> Option<&'a Variant> {
    let memory = selection.memory.as_deref()?;
    let storage = selection.storage.as_deref()?;
    let color = selection.color.as_deref()?;

    catalog
        .variants()
        .iter()
        .find(|v| v.memory == memory && v.storage == storage && v.color == color)
}
