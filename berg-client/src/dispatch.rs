//! Order action dispatcher
//!
//! Sends state-changing order requests to the backend and keeps the
//! local order board in step: the mirrored status flips once the
//! backend acknowledges, then a reconciling re-fetch picks up whatever
//! else changed server-side (timestamps, totals).

use std::fmt;
use std::time::Duration;

use shared::models::OrderStatus;

use crate::{ClientConfig, ClientError, ClientResult, HttpClient, OrderBoard};

/// State-changing order actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Cancel,
    MarkPreparing,
    MarkOutForDelivery,
    MarkDelivered,
}

impl OrderAction {
    /// Status this action moves the order to
    pub fn target_status(self) -> OrderStatus {
        match self {
            Self::Cancel => OrderStatus::Cancelled,
            Self::MarkPreparing => OrderStatus::Preparing,
            Self::MarkOutForDelivery => OrderStatus::OutForDelivery,
            Self::MarkDelivered => OrderStatus::Delivered,
        }
    }

    /// Transition gate: whether this action is permitted from `current`
    pub fn allowed_from(self, current: OrderStatus) -> bool {
        match self {
            Self::Cancel => !current.is_terminal(),
            Self::MarkPreparing => current == OrderStatus::Pending,
            Self::MarkOutForDelivery => current == OrderStatus::Preparing,
            Self::MarkDelivered => {
                matches!(current, OrderStatus::Preparing | OrderStatus::OutForDelivery)
            }
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => write!(f, "cancel"),
            Self::MarkPreparing => write!(f, "mark preparing"),
            Self::MarkOutForDelivery => write!(f, "mark out for delivery"),
            Self::MarkDelivered => write!(f, "mark delivered"),
        }
    }
}

/// Dispatches order actions against the backend for one order board
#[derive(Debug, Clone)]
pub struct OrderDispatcher {
    http: HttpClient,
    board: OrderBoard,
    reconcile_after: Duration,
}

impl OrderDispatcher {
    pub fn new(http: HttpClient, board: OrderBoard) -> Self {
        Self {
            http,
            board,
            reconcile_after: Duration::from_secs(2),
        }
    }

    /// Build a dispatcher from configuration
    pub fn from_config(config: &ClientConfig, board: OrderBoard) -> Self {
        Self::new(config.build_http_client(), board).with_reconcile_after(config.reconcile_after)
    }

    /// Set the delay before the reconciling re-fetch (zero disables it)
    pub fn with_reconcile_after(mut self, delay: Duration) -> Self {
        self.reconcile_after = delay;
        self
    }

    /// Dispatch an action for the given order
    ///
    /// The transition gate runs locally first: a violation yields
    /// [`ClientError::InvalidTransition`] and nothing is sent. On a
    /// backend ack the mirrored status is updated and a reconciling
    /// `fetch_orders` is scheduled; on failure the mirror is untouched.
    pub async fn dispatch(&self, order_id: &str, action: OrderAction) -> ClientResult<()> {
        let current = self
            .board
            .status_of(order_id)
            .ok_or_else(|| ClientError::NotFound(format!("order {}", order_id)))?;

        if !action.allowed_from(current) {
            return Err(ClientError::InvalidTransition {
                from: current,
                action,
            });
        }

        match action {
            OrderAction::Cancel => self.http.cancel_order(order_id).await?,
            _ => {
                self.http
                    .set_order_status(order_id, action.target_status())
                    .await?
            }
        }

        self.board.set_status(order_id, action.target_status());
        tracing::debug!(order_id, %action, "Order action acknowledged");

        self.schedule_reconcile();
        Ok(())
    }

    /// Re-fetch the order list after a short delay to pick up
    /// authoritative server state
    fn schedule_reconcile(&self) {
        if self.reconcile_after.is_zero() {
            return;
        }

        let http = self.http.clone();
        let board = self.board.clone();
        let delay = self.reconcile_after;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match http.fetch_orders().await {
                Ok(orders) => board.replace_all(orders),
                Err(e) => tracing::warn!("Order list reconcile failed: {}", e),
            }
        });
    }
}
