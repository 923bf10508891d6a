//! Domain models shared between the client crates and the backend

pub mod menu_item;
pub mod order;
pub mod restaurant;

pub use menu_item::{DietKind, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{
    CustomerInfo, DeliveryMode, Order, OrderDraft, OrderItem, OrderStatus, OrderStatusUpdate,
    PaymentMethod,
};
pub use restaurant::{MenuSnapshot, Restaurant, RestaurantUpdate};
