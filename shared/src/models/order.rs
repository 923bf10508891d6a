//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Order status lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Preparing => write!(f, "PREPARING"),
            Self::OutForDelivery => write!(f, "OUT_FOR_DELIVERY"),
            Self::Delivered => write!(f, "DELIVERED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Delivery mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMode {
    Delivery,
    #[default]
    Pickup,
}

/// Payment method (binary choice at checkout)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
}

/// Order line item
///
/// Price is snapshotted at order time, never re-derived from the
/// current menu item state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Menu item reference (String ID)
    pub item_id: String,
    pub name: String,
    /// Unit price at order time
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total (unit price × quantity)
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Customer contact fields
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub email: Option<String>,
}

/// Order entity (backend-authoritative)
///
/// Delivered to clients via fetch or pushed through the order feed.
/// The total is backend-supplied and trusted; clients do not recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Ordered timestamp (Unix milliseconds)
    pub placed_at: Timestamp,
    pub status: OrderStatus,
    pub mode: DeliveryMode,
    pub customer: CustomerInfo,
    pub items: Vec<OrderItem>,
    /// Total amount including any delivery-mode charges
    pub total: Decimal,
    /// Requested pickup time ("HH:MM"), pickup orders only
    pub pickup_time: Option<String>,
    pub payment: Option<PaymentMethod>,
}

/// Order submission payload (customer checkout)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub restaurant_id: String,
    pub items: Vec<OrderItem>,
    pub mode: DeliveryMode,
    pub pickup_time: Option<String>,
    pub payment: PaymentMethod,
    pub customer: CustomerInfo,
}

/// Update status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"OUT_FOR_DELIVERY\"");

        let parsed: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::OutForDelivery.is_terminal());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            item_id: "dish-1".to_string(),
            name: "Margherita".to_string(),
            price: Decimal::from_f64(8.50).unwrap(),
            quantity: 3,
        };
        assert_eq!(item.line_total(), Decimal::from_f64(25.50).unwrap());
    }
}
