//! Store-page browsing: filters and pagination over the product listing.
//!
//! Purely client-side, like the store page itself: the full listing is
//! fetched once and filtered/paged in memory.

use origami_core::{Price, ProductId};

/// Products shown per page (a 3x3 grid).
pub const PAGE_SIZE: usize = 9;

/// One product card on the store grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    /// `"Apple iPhone 15"`.
    pub title: String,
    /// Lowercased category label used by the brand filter.
    pub category: String,
    /// Cheapest variant price; `None` when the product has no variants.
    pub base_price: Option<Price>,
    pub image_url: Option<String>,
}

/// Active browse filters. Empty filters match everything.
#[derive(Debug, Clone, Default)]
pub struct BrowseFilter {
    /// Case-insensitive substring match on the card title.
    pub search: Option<String>,
    /// Exact match on the lowercased category.
    pub category: Option<String>,
}

impl BrowseFilter {
    fn matches(&self, card: &ProductCard) -> bool {
        let ok_text = self.search.as_deref().is_none_or(|q| {
            card.title
                .to_lowercase()
                .contains(&q.trim().to_lowercase())
        });
        let ok_category = self
            .category
            .as_deref()
            .is_none_or(|c| card.category == c.to_lowercase());
        ok_text && ok_category
    }
}

/// One rendered page of the filtered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowsePage {
    pub cards: Vec<ProductCard>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_more_pages: bool,
}

/// Filter the listing and slice out one page.
///
/// Pages are 1-based; a requested page past the end clamps to the last
/// page (an empty result still reports one page).
#[must_use]
pub fn browse(cards: &[ProductCard], filter: &BrowseFilter, page: usize) -> BrowsePage {
    let matched: Vec<&ProductCard> = cards.iter().filter(|c| filter.matches(c)).collect();
    let total_pages = matched.len().div_ceil(PAGE_SIZE).max(1);
    let current_page = page.clamp(1, total_pages);
    let start = (current_page - 1) * PAGE_SIZE;

    BrowsePage {
        cards: matched
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .cloned()
            .collect(),
        current_page,
        total_pages,
        has_more_pages: current_page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i32, title: &str, category: &str) -> ProductCard {
        ProductCard {
            id: ProductId::new(id),
            title: title.to_string(),
            category: category.to_string(),
            base_price: Some(Price::from(900)),
            image_url: None,
        }
    }

    fn listing() -> Vec<ProductCard> {
        (1..=20)
            .map(|i| {
                let category = if i % 2 == 0 { "apple" } else { "samsung" };
                card(i, &format!("Phone {i}"), category)
            })
            .collect()
    }

    #[test]
    fn test_pagination_slices_nine_per_page() {
        let cards = listing();
        let page1 = browse(&cards, &BrowseFilter::default(), 1);
        assert_eq!(page1.cards.len(), PAGE_SIZE);
        assert_eq!(page1.total_pages, 3);
        assert!(page1.has_more_pages);

        let page3 = browse(&cards, &BrowseFilter::default(), 3);
        assert_eq!(page3.cards.len(), 2);
        assert!(!page3.has_more_pages);
    }

    #[test]
    fn test_page_clamps_to_last() {
        let cards = listing();
        let page = browse(&cards, &BrowseFilter::default(), 99);
        assert_eq!(page.current_page, 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let cards = vec![
            card(1, "Apple iPhone 15", "apple"),
            card(2, "Samsung Galaxy S24", "samsung"),
        ];
        let filter = BrowseFilter {
            search: Some("iphone".to_string()),
            category: None,
        };
        let page = browse(&cards, &filter, 1);
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].title, "Apple iPhone 15");
    }

    #[test]
    fn test_category_filter() {
        let cards = listing();
        let filter = BrowseFilter {
            search: None,
            category: Some("Apple".to_string()),
        };
        let page = browse(&cards, &filter, 1);
        assert!(page.cards.iter().all(|c| c.category == "apple"));
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_empty_result_still_has_one_page() {
        let cards = listing();
        let filter = BrowseFilter {
            search: Some("nokia".to_string()),
            category: None,
        };
        let page = browse(&cards, &filter, 1);
        assert!(page.cards.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.current_page, 1);
    }
}
