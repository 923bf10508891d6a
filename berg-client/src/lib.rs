//! Berg Client - Cuisineberg backend client
//!
//! Typed HTTP calls to the Cuisineberg API plus the client-side state
//! cores: cart, menu filter, order board, order feed subscriber, order
//! dispatcher, and checkout form.

pub mod board;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod feed;
pub mod http;
pub mod menu;

pub use board::OrderBoard;
pub use cart::{CartLine, CartStore};
pub use checkout::CheckoutForm;
pub use config::ClientConfig;
pub use dispatch::{OrderAction, OrderDispatcher};
pub use error::{ClientError, ClientResult};
pub use feed::{FeedAlert, FeedConnector, FeedError, FeedState, OrderFeedSubscriber, ReadinessProbe};
pub use http::HttpClient;
pub use menu::filter_by_name;

// Re-export shared types for convenience
pub use shared::client::{ApiResponse, HealthReport, ImageUploadResponse, LoginResponse, UserInfo};
pub use shared::models::{
    CustomerInfo, DeliveryMode, MenuItem, MenuSnapshot, Order, OrderItem, OrderStatus,
    PaymentMethod, Restaurant,
};
