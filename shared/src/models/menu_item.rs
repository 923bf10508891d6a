//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dietary flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DietKind {
    Vegetarian,
    NonVegetarian,
    #[default]
    Unspecified,
}

/// Menu item entity
///
/// Backend-owned; read-only from the customer client's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Unit price in currency units
    pub price: Decimal,
    /// Category tag (e.g. "Starters", "Mains")
    pub category: String,
    #[serde(default)]
    pub diet: DietKind,
    pub photo_url: Option<String>,
    pub is_active: bool,
}

/// Create menu item payload (retail dashboard)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub diet: Option<DietKind>,
    pub photo_url: Option<String>,
}

/// Update menu item payload (retail dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub diet: Option<DietKind>,
    pub photo_url: Option<String>,
    pub is_active: Option<bool>,
}
