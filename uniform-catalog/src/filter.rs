//! Derived views over the item collection.
//!
//! Everything here is a pure function of the items and the current [`Facets`].
//! Results are recomputed on every call.

use crate::item::Item;

/// Pseudo-category that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// The two filter dimensions of the public listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facets {
    pub category: String,
    pub query: String,
}

impl Default for Facets {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            query: String::new(),
        }
    }
}

impl Facets {
    pub fn new(category: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            query: query.into(),
        }
    }

    /// Whether `item` belongs in the public listing under these facets.
    pub fn matches(&self, item: &Item) -> bool {
        Matcher::new(self).matches(item)
    }
}

/// Facets with the search text normalized once per scan.
struct Matcher<'a> {
    category: Option<&'a str>,
    query: Option<String>,
}

impl<'a> Matcher<'a> {
    fn new(facets: &'a Facets) -> Self {
        let category = (facets.category != ALL_CATEGORIES).then_some(facets.category.as_str());
        let query = facets.query.trim();
        let query = (!query.is_empty()).then(|| query.to_lowercase());
        Self { category, query }
    }

    fn matches(&self, item: &Item) -> bool {
        if !item.available {
            return false;
        }
        if self.category.is_some_and(|category| item.category != category) {
            return false;
        }
        match &self.query {
            Some(query) => {
                item.name.to_lowercase().contains(query.as_str())
                    || item.size.to_lowercase().contains(query.as_str())
            }
            None => true,
        }
    }
}

/// Available items matching `facets`, in collection order.
pub fn filter_items<'a>(
    items: impl IntoIterator<Item = &'a Item>,
    facets: &Facets,
) -> Vec<&'a Item> {
    let matcher = Matcher::new(facets);
    items
        .into_iter()
        .filter(|item| matcher.matches(item))
        .collect()
}

/// `"All"` followed by each distinct category in order of first appearance.
///
/// Unavailable items still contribute their category.
pub fn categories<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a str> {
    let mut seen: Vec<&'a str> = vec![ALL_CATEGORIES];
    for item in items {
        let category = item.category.as_str();
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Each entry of [`categories`] paired with its number of available items.
pub fn category_counts<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<(&'a str, usize)> {
    let items: Vec<&'a Item> = items.into_iter().collect();
    categories(items.iter().copied())
        .into_iter()
        .map(|category| {
            let count = items
                .iter()
                .filter(|item| {
                    item.available && (category == ALL_CATEGORIES || item.category == category)
                })
                .count();
            (category, count)
        })
        .collect()
}
