//! Shopping cart state
//!
//! View-local, ephemeral cart: one line per menu item, insertion order
//! preserved for stable display. Totals are derived on every read.

use rust_decimal::Decimal;
use shared::models::{MenuItem, OrderItem};

/// A pending selection: menu item plus quantity
///
/// Quantity is always >= 1; a line decremented to zero is removed from
/// the cart rather than retained.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

/// In-memory cart, owned exclusively by the ordering view
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of the given item
    ///
    /// Increments the existing line if the item is already present,
    /// otherwise appends a new line with quantity 1.
    pub fn add(&mut self, item: &MenuItem) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item.id == item.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove one unit of the given item
    ///
    /// Decrements the line, deleting it when the quantity reaches zero.
    /// No-op when the item is not in the cart.
    pub fn remove(&mut self, item_id: &str) {
        if let Some(idx) = self.lines.iter().position(|l| l.item.id == item_id) {
            if self.lines[idx].quantity > 1 {
                self.lines[idx].quantity -= 1;
            } else {
                self.lines.remove(idx);
            }
        }
    }

    /// Cart total, recomputed on every read
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.item.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Sum of quantities across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Convert to order items with the current prices snapshotted
    pub fn draft_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                item_id: l.item.id.clone(),
                name: l.item.name.clone(),
                price: l.item.price,
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use shared::models::DietKind;

    fn item(id: &str, price: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: format!("Dish {}", id),
            price: Decimal::from_f64(price).unwrap(),
            category: "Mains".to_string(),
            diet: DietKind::Unspecified,
            photo_url: None,
            is_active: true,
        }
    }

    #[test]
    fn test_repeated_add_keeps_single_line() {
        let mut cart = CartStore::new();
        let dish = item("a", 4.50);

        for _ in 0..5 {
            cart.add(&dish);
        }

        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_remove_decrements_to_deletion() {
        let mut cart = CartStore::new();
        let dish = item("a", 4.50);
        cart.add(&dish);
        cart.add(&dish);
        cart.add(&dish);

        cart.remove("a");
        assert_eq!(cart.item_count(), 2);
        cart.remove("a");
        cart.remove("a");

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = CartStore::new();
        cart.add(&item("a", 4.50));
        cart.remove("missing");
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_roundtrip() {
        let mut cart = CartStore::new();
        cart.add(&item("a", 4.50));
        cart.add(&item("b", 10.20));
        let before = cart.total();

        cart.add(&item("c", 3.99));
        cart.remove("c");

        assert_eq!(cart.total(), before);
        assert_eq!(cart.total(), Decimal::from_f64(14.70).unwrap());
    }

    #[test]
    fn test_insertion_order_stable_under_churn() {
        let mut cart = CartStore::new();
        cart.add(&item("first", 1.0));
        cart.add(&item("second", 2.0));
        cart.add(&item("third", 3.0));

        // Churn on the middle line must not reorder the others
        cart.add(&item("second", 2.0));
        cart.remove("second");
        cart.remove("second");

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "third"]);
    }

    #[test]
    fn test_draft_items_snapshot_prices() {
        let mut cart = CartStore::new();
        cart.add(&item("a", 4.50));
        cart.add(&item("a", 4.50));

        let items = cart.draft_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Decimal::from_f64(4.50).unwrap());
    }
}
