//! Menu filtering

use shared::models::MenuItem;

/// Filter a menu by case-insensitive substring match on the item name
///
/// An empty query returns the full list in its original order. Pure and
/// synchronous; safe to call on every keystroke.
pub fn filter_by_name(menu: &[MenuItem], query: &str) -> Vec<MenuItem> {
    if query.is_empty() {
        return menu.to_vec();
    }

    let needle = query.to_lowercase();
    menu.iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
