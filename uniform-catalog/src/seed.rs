//! Built-in sample catalog used when no usable snapshot exists.

use crate::item::{Item, ItemId, NEW_ITEM_WINDOW_MS};

struct Seed {
    name: &'static str,
    category: &'static str,
    size: &'static str,
    condition: &'static str,
    description: &'static str,
    image: &'static str,
}

const SEEDS: [Seed; 8] = [
    Seed {
        name: "School Blazer - Size 12",
        category: "Blazers",
        size: "12",
        condition: "Excellent",
        description: "Navy blue school blazer in excellent condition, perfect for formal occasions",
        image: "https://placehold.co/400x500/1e3a8a/ffffff?text=Blazer+Size+12",
    },
    Seed {
        name: "School Shirt - Size 10",
        category: "Shirts",
        size: "10",
        condition: "Excellent",
        description: "White school shirt, barely worn, crisp and clean",
        image: "https://placehold.co/400x500/f3f4f6/1f2937?text=Shirt+Size+10",
    },
    Seed {
        name: "School Trousers - Size 14",
        category: "Trousers",
        size: "14",
        condition: "Good",
        description: "Grey school trousers, good condition with minimal wear",
        image: "https://placehold.co/400x500/6b7280/ffffff?text=Trousers+Size+14",
    },
    Seed {
        name: "School Skirt - Size 12",
        category: "Skirts",
        size: "12",
        condition: "Excellent",
        description: "Pleated school skirt in perfect condition, like new",
        image: "https://placehold.co/400x500/7c3aed/ffffff?text=Skirt+Size+12",
    },
    Seed {
        name: "School Tie",
        category: "Accessories",
        size: "Standard",
        condition: "Excellent",
        description: "School tie in perfect condition, like new",
        image: "https://placehold.co/400x500/dc2626/ffffff?text=School+Tie",
    },
    Seed {
        name: "School Shirt - Size 14",
        category: "Shirts",
        size: "14",
        condition: "Good",
        description: "White school shirt, well-maintained and ready to wear",
        image: "https://placehold.co/400x500/f3f4f6/1f2937?text=Shirt+Size+14",
    },
    Seed {
        name: "School Belt",
        category: "Accessories",
        size: "Medium",
        condition: "Excellent",
        description: "Leather school belt, adjustable and in great condition",
        image: "https://placehold.co/400x500/92400e/ffffff?text=School+Belt",
    },
    Seed {
        name: "School Blazer - Size 14",
        category: "Blazers",
        size: "14",
        condition: "Good",
        description: "Navy blue blazer, well-maintained with minor wear",
        image: "https://placehold.co/400x500/1e3a8a/ffffff?text=Blazer+Size+14",
    },
];

/// The eight sample items, with ids 1 through 8.
///
/// Seed items are dated one full window before `now`, so none of them shows as new.
pub fn seed_items(now: u64) -> Vec<Item> {
    let created_at = now.saturating_sub(NEW_ITEM_WINDOW_MS);
    SEEDS
        .iter()
        .zip(1..)
        .map(|(seed, id)| Item {
            id: ItemId(id),
            name: seed.name.to_string(),
            category: seed.category.to_string(),
            size: seed.size.to_string(),
            condition: seed.condition.to_string(),
            description: seed.description.to_string(),
            image: Some(seed.image.to_string()),
            available: true,
            created_at,
            is_new: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::categories;

    #[test]
    fn seed_has_eight_old_available_items() {
        let items = seed_items(NEW_ITEM_WINDOW_MS * 10);

        assert_eq!(items.len(), 8);
        assert!(items.iter().all(|item| item.available && !item.is_new));
        assert!(items.iter().all(|item| item.created_at == NEW_ITEM_WINDOW_MS * 9));
    }

    #[test]
    fn seed_categories() {
        let items = seed_items(0);

        assert_eq!(
            categories(&items),
            vec!["All", "Blazers", "Shirts", "Trousers", "Skirts", "Accessories"]
        );
    }
}
