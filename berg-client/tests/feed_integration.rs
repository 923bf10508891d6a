// berg-client/tests/feed_integration.rs
// Order feed subscriber tests over the in-memory transport

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::broadcast;

use berg_client::{
    FeedConnector, FeedError, FeedState, OrderBoard, OrderFeedSubscriber, ReadinessProbe,
};
use shared::message::{EventType, FeedMessage, JoinScopePayload};
use shared::models::{CustomerInfo, DeliveryMode, Order, OrderStatus};

#[derive(Debug)]
struct StaticProbe(bool);

#[async_trait]
impl ReadinessProbe for StaticProbe {
    async fn ready(&self) -> bool {
        self.0
    }
}

/// In-memory stand-in for the backend feed endpoint
struct MemoryFeed {
    /// Server -> client pushes
    server_tx: broadcast::Sender<FeedMessage>,
    /// Client -> server messages (handshake, join-scope)
    client_tx: broadcast::Sender<FeedMessage>,
}

impl MemoryFeed {
    fn new() -> Self {
        let (server_tx, _) = broadcast::channel(64);
        let (client_tx, _) = broadcast::channel(64);
        Self {
            server_tx,
            client_tx,
        }
    }

    fn connector(&self) -> FeedConnector {
        FeedConnector::Memory {
            server_tx: self.server_tx.clone(),
            client_tx: self.client_tx.clone(),
        }
    }
}

fn order(id: &str) -> Order {
    Order {
        id: id.to_string(),
        placed_at: 1_700_000_000_000,
        status: OrderStatus::Pending,
        mode: DeliveryMode::Delivery,
        customer: CustomerInfo {
            name: "Ada".to_string(),
            phone: "555-0100".to_string(),
            address: Some("1 Main St".to_string()),
            email: None,
        },
        items: vec![],
        total: Decimal::new(3250, 2),
        pickup_time: None,
        payment: None,
    }
}

async fn wait_for_receiver_count(tx: &broadcast::Sender<FeedMessage>, expected: usize) {
    for _ in 0..100 {
        if tx.receiver_count() == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("receiver count never reached {}", expected);
}

#[tokio::test]
async fn test_new_order_prepends_to_board() {
    let feed = MemoryFeed::new();
    // The test plays the server: hold a receiver so client writes land
    let mut server_rx = feed.client_tx.subscribe();

    let board = OrderBoard::new();
    board.replace_all(vec![order("old-1")]);

    let mut sub =
        OrderFeedSubscriber::new(Arc::new(StaticProbe(true)), feed.connector(), board.clone());
    sub.subscribe("R1").await.unwrap();
    assert_eq!(sub.state(), FeedState::Connected);
    assert_eq!(sub.scope(), Some("R1"));

    // Server sees the handshake, then the join for R1
    let handshake = server_rx.recv().await.unwrap();
    assert_eq!(handshake.event_type, EventType::Handshake);
    let join = server_rx.recv().await.unwrap();
    assert_eq!(join.event_type, EventType::JoinScope);
    let payload: JoinScopePayload = join.parse_payload().unwrap();
    assert_eq!(payload.restaurant_id, "R1");

    let mut alerts = sub.alerts();
    feed.server_tx
        .send(FeedMessage::new_order(&order("fresh-1")))
        .unwrap();

    let alert = alerts.recv().await.unwrap();
    assert_eq!(alert.order_id, "fresh-1");
    assert_eq!(alert.customer, "Ada");

    assert_eq!(board.len(), 2);
    assert_eq!(board.snapshot()[0].id, "fresh-1");
}

#[tokio::test]
async fn test_duplicate_order_event_collapses() {
    let feed = MemoryFeed::new();
    let _server_rx = feed.client_tx.subscribe();

    let board = OrderBoard::new();
    let mut sub =
        OrderFeedSubscriber::new(Arc::new(StaticProbe(true)), feed.connector(), board.clone());
    sub.subscribe("R1").await.unwrap();

    let mut alerts = sub.alerts();
    feed.server_tx
        .send(FeedMessage::new_order(&order("dup-1")))
        .unwrap();
    feed.server_tx
        .send(FeedMessage::new_order(&order("dup-1")))
        .unwrap();
    feed.server_tx
        .send(FeedMessage::new_order(&order("marker")))
        .unwrap();

    // Alerts fire only for fresh orders: dup-1 once, then the marker
    assert_eq!(alerts.recv().await.unwrap().order_id, "dup-1");
    assert_eq!(alerts.recv().await.unwrap().order_id, "marker");

    assert_eq!(board.len(), 2);
    let dup_count = board
        .snapshot()
        .iter()
        .filter(|o| o.id == "dup-1")
        .count();
    assert_eq!(dup_count, 1);
}

#[tokio::test]
async fn test_scope_change_tears_down_before_reconnect() {
    let feed = MemoryFeed::new();
    let mut server_rx = feed.client_tx.subscribe();

    let board = OrderBoard::new();
    let mut sub =
        OrderFeedSubscriber::new(Arc::new(StaticProbe(true)), feed.connector(), board.clone());

    sub.subscribe("R1").await.unwrap();
    wait_for_receiver_count(&feed.server_tx, 1).await;

    sub.subscribe("R2").await.unwrap();
    assert_eq!(sub.scope(), Some("R2"));
    assert_eq!(sub.state(), FeedState::Connected);

    // The R1 connection is fully inactive: only the R2 read loop holds a
    // receiver once the cancelled task has wound down.
    wait_for_receiver_count(&feed.server_tx, 1).await;

    // The server saw joins for R1 then R2
    let mut joins = vec![];
    while let Ok(msg) = server_rx.try_recv() {
        if msg.event_type == EventType::JoinScope {
            let payload: JoinScopePayload = msg.parse_payload().unwrap();
            joins.push(payload.restaurant_id);
        }
    }
    assert_eq!(joins, vec!["R1", "R2"]);

    // An event delivered now is applied exactly once, by the live loop
    let mut alerts = sub.alerts();
    feed.server_tx
        .send(FeedMessage::new_order(&order("after-switch")))
        .unwrap();
    alerts.recv().await.unwrap();
    assert_eq!(board.len(), 1);
}

#[tokio::test]
async fn test_shutdown_stops_event_delivery() {
    let feed = MemoryFeed::new();
    let _server_rx = feed.client_tx.subscribe();

    let board = OrderBoard::new();
    let mut sub =
        OrderFeedSubscriber::new(Arc::new(StaticProbe(true)), feed.connector(), board.clone());
    sub.subscribe("R1").await.unwrap();
    wait_for_receiver_count(&feed.server_tx, 1).await;

    sub.shutdown().await;
    assert_eq!(sub.state(), FeedState::Disconnected);
    assert_eq!(sub.scope(), None);
    wait_for_receiver_count(&feed.server_tx, 0).await;

    // Nobody is listening; the board stays untouched
    let _ = feed.server_tx.send(FeedMessage::new_order(&order("late")));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(board.is_empty());
}

#[tokio::test]
async fn test_failed_probe_never_connects() {
    let feed = MemoryFeed::new();
    let board = OrderBoard::new();
    let mut sub =
        OrderFeedSubscriber::new(Arc::new(StaticProbe(false)), feed.connector(), board.clone());

    let result = sub.subscribe("R1").await;
    assert!(matches!(result, Err(FeedError::NotReady(_))));
    assert_eq!(sub.state(), FeedState::Failed);

    // No transport was ever created
    assert_eq!(feed.server_tx.receiver_count(), 0);
}

#[tokio::test]
async fn test_empty_scope_rejected() {
    let feed = MemoryFeed::new();
    let mut sub = OrderFeedSubscriber::new(
        Arc::new(StaticProbe(true)),
        feed.connector(),
        OrderBoard::new(),
    );

    let result = sub.subscribe("").await;
    assert!(matches!(result, Err(FeedError::InvalidScope(_))));
    assert_eq!(sub.state(), FeedState::Idle);
}
