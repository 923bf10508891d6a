//! Pickup/payment checkout form
//!
//! Small local form state: a pickup time and a payment choice. The
//! payment options are only offered once a time is chosen, so
//! `can_submit` gates on the time alone; `submit` requires both.

use chrono::NaiveTime;
use shared::models::{CustomerInfo, DeliveryMode, OrderDraft, PaymentMethod};

use crate::{CartStore, ClientError, ClientResult};

/// Checkout form state for a pickup order
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pickup_time: Option<NaiveTime>,
    payment: Option<PaymentMethod>,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pickup time from an "HH:MM" string
    pub fn set_pickup_time(&mut self, value: &str) -> ClientResult<()> {
        let time = NaiveTime::parse_from_str(value, "%H:%M")
            .map_err(|_| ClientError::Validation(format!("Invalid pickup time: {}", value)))?;
        self.pickup_time = Some(time);
        Ok(())
    }

    pub fn clear_pickup_time(&mut self) {
        self.pickup_time = None;
    }

    pub fn set_payment(&mut self, method: PaymentMethod) {
        self.payment = Some(method);
    }

    pub fn pickup_time(&self) -> Option<NaiveTime> {
        self.pickup_time
    }

    pub fn payment(&self) -> Option<PaymentMethod> {
        self.payment
    }

    /// Whether the flow may proceed to the payment step
    pub fn can_submit(&self) -> bool {
        self.pickup_time.is_some()
    }

    /// Validate the form and assemble an order draft from the cart
    ///
    /// Requires a pickup time, a payment choice, and a non-empty cart.
    /// Placement itself goes through [`crate::HttpClient::place_order`].
    pub fn submit(
        &self,
        restaurant_id: &str,
        cart: &CartStore,
        customer: CustomerInfo,
    ) -> ClientResult<OrderDraft> {
        let pickup_time = self
            .pickup_time
            .ok_or_else(|| ClientError::Validation("Pickup time is required".to_string()))?;
        let payment = self
            .payment
            .ok_or_else(|| ClientError::Validation("Payment method is required".to_string()))?;
        if cart.is_empty() {
            return Err(ClientError::Validation("Cart is empty".to_string()));
        }

        Ok(OrderDraft {
            restaurant_id: restaurant_id.to_string(),
            items: cart.draft_items(),
            mode: DeliveryMode::Pickup,
            pickup_time: Some(pickup_time.format("%H:%M").to_string()),
            payment,
            customer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{DietKind, MenuItem};

    fn filled_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add(&MenuItem {
            id: "dish-1".to_string(),
            name: "Pad Thai".to_string(),
            price: Decimal::new(1150, 2),
            category: "Mains".to_string(),
            diet: DietKind::Vegetarian,
            photo_url: None,
            is_active: true,
        });
        cart
    }

    #[test]
    fn test_cannot_submit_without_time() {
        let form = CheckoutForm::new();
        assert!(!form.can_submit());
    }

    #[test]
    fn test_time_alone_enables_submit_step() {
        let mut form = CheckoutForm::new();
        form.set_pickup_time("18:30").unwrap();
        assert!(form.can_submit());
        // Payment not yet chosen; only the final submit requires it
        assert!(form.payment().is_none());
    }

    #[test]
    fn test_invalid_time_rejected() {
        let mut form = CheckoutForm::new();
        assert!(form.set_pickup_time("25:99").is_err());
        assert!(form.set_pickup_time("soonish").is_err());
        assert!(!form.can_submit());
    }

    #[test]
    fn test_submit_requires_payment() {
        let mut form = CheckoutForm::new();
        form.set_pickup_time("12:15").unwrap();

        let result = form.submit("rest-1", &filled_cart(), CustomerInfo::default());
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_submit_requires_items() {
        let mut form = CheckoutForm::new();
        form.set_pickup_time("12:15").unwrap();
        form.set_payment(PaymentMethod::Cash);

        let result = form.submit("rest-1", &CartStore::new(), CustomerInfo::default());
        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_submit_builds_draft() {
        let mut form = CheckoutForm::new();
        form.set_pickup_time("12:15").unwrap();
        form.set_payment(PaymentMethod::Card);

        let draft = form
            .submit("rest-1", &filled_cart(), CustomerInfo::default())
            .unwrap();

        assert_eq!(draft.restaurant_id, "rest-1");
        assert_eq!(draft.pickup_time.as_deref(), Some("12:15"));
        assert_eq!(draft.payment, PaymentMethod::Card);
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.mode, DeliveryMode::Pickup);
    }
}
