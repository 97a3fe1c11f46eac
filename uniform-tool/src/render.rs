use tabled::builder::Builder;
use tabled::settings::Style;
use uniform_catalog::Item;

/// Renders items as a table, one row per item.
///
/// New items are tagged in the status column; unavailable ones are marked hidden.
pub fn item_table<'a>(items: impl IntoIterator<Item = &'a Item>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Category", "Size", "Condition", "Status"]);

    for item in items {
        let status = match (item.available, item.is_new) {
            (false, _) => "hidden",
            (true, true) => "NEW",
            (true, false) => "",
        };
        builder.push_record([
            item.id.to_string(),
            item.name.clone(),
            item.category.clone(),
            item.size.clone(),
            item.condition.clone(),
            status.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

pub fn category_table(counts: &[(&str, usize)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Category", "Available"]);
    for (category, count) in counts {
        builder.push_record([category.to_string(), count.to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// "Showing 3 items", with singular and empty forms.
pub fn showing(count: usize) -> String {
    match count {
        0 => "No items found".to_string(),
        1 => "Showing 1 item".to_string(),
        n => format!("Showing {n} items"),
    }
}

/// Admin listing header: the full count, plus how many are public.
pub fn admin_header(total: usize, available: usize) -> String {
    match total {
        0 => "All items (0)".to_string(),
        n => format!("All items ({n}), {available} available"),
    }
}
