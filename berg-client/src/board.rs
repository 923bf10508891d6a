//! Local order mirror
//!
//! The order list a retail view renders, shared between the feed read
//! loop (prepends pushed orders) and the dispatcher (applies acked
//! status changes, replaces wholesale on reconcile). Most-recent-first.
//!
//! Critical sections are short and never held across an await.

use std::sync::{Arc, RwLock};

use shared::models::{Order, OrderStatus};

/// Shared, cloneable handle to the mirrored order list
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    inner: Arc<RwLock<Vec<Order>>>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list (initial fetch or reconcile)
    pub fn replace_all(&self, orders: Vec<Order>) {
        *self.inner.write().unwrap() = orders;
    }

    /// Prepend a pushed order, most-recent-first
    ///
    /// Returns false without inserting when an order with the same id
    /// is already mirrored, collapsing duplicate feed deliveries.
    pub fn prepend(&self, order: Order) -> bool {
        let mut orders = self.inner.write().unwrap();
        if orders.iter().any(|o| o.id == order.id) {
            return false;
        }
        orders.insert(0, order);
        true
    }

    /// Apply an acknowledged status change to the local mirror
    ///
    /// Returns false when the order is not mirrored.
    pub fn set_status(&self, order_id: &str, status: OrderStatus) -> bool {
        let mut orders = self.inner.write().unwrap();
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    /// Current status of a mirrored order
    pub fn status_of(&self, order_id: &str) -> Option<OrderStatus> {
        self.inner
            .read()
            .unwrap()
            .iter()
            .find(|o| o.id == order_id)
            .map(|o| o.status)
    }

    /// Clone of the current list for rendering
    pub fn snapshot(&self) -> Vec<Order> {
        self.inner.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().is_empty()
    }
}
