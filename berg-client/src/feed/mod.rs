//! Live order feed
//!
//! Maintains a push subscription scoped to one restaurant at a time.
//! The subscriber is an explicit state machine:
//!
//! `Idle -> HealthChecking -> Connecting -> Connected -> Disconnected`
//!
//! A failed readiness probe parks it in `Failed` without ever opening a
//! socket. Scope changes and unmounts tear the connection down through
//! a cancellation token before anything new is established, so a stale
//! connection can never keep delivering events. Read errors log and
//! flip the state to `Disconnected`; there is no automatic reconnect,
//! the owning view re-subscribes explicitly.

pub mod transport;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use shared::message::{
    EventType, FeedMessage, HandshakePayload, JoinScopePayload, NotificationPayload,
    PROTOCOL_VERSION,
};
use shared::models::Order;

use crate::{ClientConfig, HttpClient, OrderBoard};
use transport::{MemoryTransport, TcpTransport, TlsTransport, Transport};

/// Feed error type
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Connection failed or dropped
    #[error("Feed connection error: {0}")]
    Connection(String),

    /// I/O error on the wire
    #[error("Feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Frame could not be decoded
    #[error("Invalid feed message: {0}")]
    InvalidMessage(String),

    /// Backend readiness probe refused the connection attempt
    #[error("Backend not ready: {0}")]
    NotReady(String),

    /// Subscription scope missing or malformed
    #[error("Invalid scope: {0}")]
    InvalidScope(String),
}

/// Subscriber lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    HealthChecking,
    Connecting,
    Connected,
    Disconnected,
    Failed,
}

/// Readiness check consulted before any feed connection is opened
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn ready(&self) -> bool;
}

#[async_trait]
impl ReadinessProbe for HttpClient {
    async fn ready(&self) -> bool {
        match self.health().await {
            Ok(report) => report.ok && report.feed_ready,
            Err(e) => {
                tracing::warn!("Health probe failed: {}", e);
                false
            }
        }
    }
}

/// How the subscriber reaches the feed endpoint
#[derive(Debug, Clone)]
pub enum FeedConnector {
    Tcp {
        addr: String,
    },
    Tls {
        addr: String,
        domain: String,
        extra_ca_pem: Option<String>,
    },
    Memory {
        server_tx: broadcast::Sender<FeedMessage>,
        client_tx: broadcast::Sender<FeedMessage>,
    },
}

impl FeedConnector {
    /// Derive a connector from the client configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, FeedError> {
        let addr = config
            .feed_addr
            .clone()
            .ok_or_else(|| FeedError::Connection("No feed address configured".to_string()))?;

        if config.feed_tls {
            let domain = config
                .feed_tls_domain
                .clone()
                .unwrap_or_else(|| addr.split(':').next().unwrap_or(&addr).to_string());
            Ok(Self::Tls {
                addr,
                domain,
                extra_ca_pem: config.feed_extra_ca.clone(),
            })
        } else {
            Ok(Self::Tcp { addr })
        }
    }

    async fn connect(&self) -> Result<FeedTransport, FeedError> {
        match self {
            Self::Tcp { addr } => Ok(FeedTransport::Tcp(TcpTransport::connect(addr).await?)),
            Self::Tls {
                addr,
                domain,
                extra_ca_pem,
            } => {
                let tls_config = build_tls_config(extra_ca_pem.as_deref())?;
                Ok(FeedTransport::Tls(
                    TlsTransport::connect(addr, domain, tls_config).await?,
                ))
            }
            Self::Memory {
                server_tx,
                client_tx,
            } => Ok(FeedTransport::Memory(MemoryTransport::new(
                server_tx, client_tx,
            ))),
        }
    }
}

/// Trust webpki roots plus an optional extra CA (PEM)
fn build_tls_config(extra_ca_pem: Option<&str>) -> Result<rustls::ClientConfig, FeedError> {
    let mut root_store = rustls::RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    if let Some(pem) = extra_ca_pem {
        let mut reader = std::io::Cursor::new(pem.as_bytes());
        for cert in rustls_pemfile::certs(&mut reader) {
            let cert =
                cert.map_err(|e| FeedError::Connection(format!("Invalid CA certificate: {}", e)))?;
            root_store.add(cert).map_err(|e| {
                FeedError::Connection(format!("Failed to add CA certificate: {}", e))
            })?;
        }
    }

    Ok(rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth())
}

#[derive(Debug, Clone)]
enum FeedTransport {
    Tcp(TcpTransport),
    Tls(TlsTransport),
    Memory(MemoryTransport),
}

impl FeedTransport {
    async fn read_message(&self) -> Result<FeedMessage, FeedError> {
        match self {
            Self::Tcp(t) => t.read_message().await,
            Self::Tls(t) => t.read_message().await,
            Self::Memory(t) => t.read_message().await,
        }
    }

    async fn write_message(&self, msg: &FeedMessage) -> Result<(), FeedError> {
        match self {
            Self::Tcp(t) => t.write_message(msg).await,
            Self::Tls(t) => t.write_message(msg).await,
            Self::Memory(t) => t.write_message(msg).await,
        }
    }

    async fn close(&self) -> Result<(), FeedError> {
        match self {
            Self::Tcp(t) => t.close().await,
            Self::Tls(t) => t.close().await,
            Self::Memory(t) => t.close().await,
        }
    }
}

/// Alert emitted when a fresh order lands on the board
///
/// The audible/visual notification seam: the UI subscribes via
/// [`OrderFeedSubscriber::alerts`].
#[derive(Debug, Clone)]
pub struct FeedAlert {
    pub order_id: String,
    pub customer: String,
    pub total: Decimal,
}

struct ActiveConnection {
    scope: String,
    transport: FeedTransport,
    cancel: CancellationToken,
}

/// Live order feed subscriber, one restaurant scope at a time
pub struct OrderFeedSubscriber {
    probe: Arc<dyn ReadinessProbe>,
    connector: FeedConnector,
    board: OrderBoard,
    state: Arc<Mutex<FeedState>>,
    alert_tx: broadcast::Sender<FeedAlert>,
    conn: Option<ActiveConnection>,
}

impl OrderFeedSubscriber {
    pub fn new(
        probe: Arc<dyn ReadinessProbe>,
        connector: FeedConnector,
        board: OrderBoard,
    ) -> Self {
        let (alert_tx, _) = broadcast::channel(64);
        Self {
            probe,
            connector,
            board,
            state: Arc::new(Mutex::new(FeedState::Idle)),
            alert_tx,
            conn: None,
        }
    }

    /// Build a subscriber from configuration, probing via the HTTP client
    pub fn from_config(config: &ClientConfig, board: OrderBoard) -> Result<Self, FeedError> {
        let connector = FeedConnector::from_config(config)?;
        let http = config.build_http_client();
        Ok(Self::new(Arc::new(http), connector, board))
    }

    pub fn state(&self) -> FeedState {
        *self.state.lock().unwrap()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == FeedState::Connected
    }

    /// Scope of the active subscription, if any
    pub fn scope(&self) -> Option<&str> {
        self.conn.as_ref().map(|c| c.scope.as_str())
    }

    /// Subscribe to new-order alerts
    pub fn alerts(&self) -> broadcast::Receiver<FeedAlert> {
        self.alert_tx.subscribe()
    }

    /// Subscribe to the given restaurant scope
    ///
    /// Any prior connection is torn down first, unconditionally. The
    /// readiness probe gates the connection attempt: on refusal the
    /// subscriber parks in `Failed` and no socket is opened.
    pub async fn subscribe(&mut self, scope: &str) -> Result<(), FeedError> {
        if scope.is_empty() {
            return Err(FeedError::InvalidScope(
                "Restaurant scope is empty".to_string(),
            ));
        }

        self.teardown().await;

        self.set_state(FeedState::HealthChecking);
        if !self.probe.ready().await {
            self.set_state(FeedState::Failed);
            return Err(FeedError::NotReady(
                "Backend readiness probe refused".to_string(),
            ));
        }

        self.set_state(FeedState::Connecting);
        let transport = match self.connector.connect().await {
            Ok(t) => t,
            Err(e) => {
                self.set_state(FeedState::Disconnected);
                return Err(e);
            }
        };

        let handshake = FeedMessage::handshake(&HandshakePayload {
            version: PROTOCOL_VERSION,
            client_name: Some("berg-client".to_string()),
            client_version: Some(env!("CARGO_PKG_VERSION").to_string()),
        });
        let join = FeedMessage::join_scope(&JoinScopePayload {
            restaurant_id: scope.to_string(),
        });

        for msg in [&handshake, &join] {
            if let Err(e) = transport.write_message(msg).await {
                let _ = transport.close().await;
                self.set_state(FeedState::Disconnected);
                return Err(e);
            }
        }

        self.set_state(FeedState::Connected);

        let cancel = CancellationToken::new();
        self.spawn_read_loop(transport.clone(), cancel.clone());
        self.conn = Some(ActiveConnection {
            scope: scope.to_string(),
            transport,
            cancel,
        });

        tracing::info!(scope, "Order feed connected");
        Ok(())
    }

    /// Unconditional teardown on unmount
    pub async fn shutdown(&mut self) {
        self.teardown().await;
    }

    async fn teardown(&mut self) {
        if let Some(conn) = self.conn.take() {
            conn.cancel.cancel();
            if let Err(e) = conn.transport.close().await {
                tracing::debug!("Feed transport close: {}", e);
            }
            self.set_state(FeedState::Disconnected);
            tracing::info!(scope = %conn.scope, "Order feed disconnected");
        }
    }

    fn set_state(&self, state: FeedState) {
        *self.state.lock().unwrap() = state;
    }

    fn spawn_read_loop(&self, transport: FeedTransport, cancel: CancellationToken) {
        let state = self.state.clone();
        let board = self.board.clone();
        let alert_tx = self.alert_tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = transport.read_message() => match result {
                        Ok(msg) => handle_message(msg, &board, &alert_tx),
                        Err(e) => {
                            // Soft failure: the rest of the client keeps
                            // working without live updates.
                            if !cancel.is_cancelled() {
                                tracing::warn!("Order feed read error: {}", e);
                                *state.lock().unwrap() = FeedState::Disconnected;
                            }
                            break;
                        }
                    }
                }
            }
        });
    }
}

fn handle_message(msg: FeedMessage, board: &OrderBoard, alert_tx: &broadcast::Sender<FeedAlert>) {
    match msg.event_type {
        EventType::NewOrder => match msg.parse_payload::<Order>() {
            Ok(order) => {
                let alert = FeedAlert {
                    order_id: order.id.clone(),
                    customer: order.customer.name.clone(),
                    total: order.total,
                };
                if board.prepend(order) {
                    tracing::debug!(order_id = %alert.order_id, "New order received");
                    if alert_tx.send(alert).is_err() {
                        tracing::debug!("No alert subscribers");
                    }
                } else {
                    tracing::debug!(order_id = %alert.order_id, "Duplicate order event ignored");
                }
            }
            Err(e) => tracing::warn!("Malformed order payload: {}", e),
        },
        EventType::Notification => {
            if let Ok(note) = msg.parse_payload::<NotificationPayload>() {
                tracing::info!(level = %note.level, "{}: {}", note.title, note.message);
            }
        }
        EventType::Response => {
            tracing::debug!(correlation_id = ?msg.correlation_id, "Feed request acknowledged");
        }
        // Handshake and JoinScope only travel client -> server
        EventType::Handshake | EventType::JoinScope => {}
    }
}
