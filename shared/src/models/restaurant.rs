//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::MenuItem;

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Public identifier customers browse the menu by
    pub public_code: String,
    #[serde(default)]
    pub address: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
}

/// Update restaurant profile payload (retail dashboard)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
}

/// Public menu fetch result: restaurant metadata plus its menu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub restaurant: Restaurant,
    pub items: Vec<MenuItem>,
}
