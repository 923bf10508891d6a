//! Order feed message types
//!
//! Shared between the Cuisineberg backend feed endpoint and clients,
//! carried over TCP/TLS framing or in-memory channels.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use uuid::Uuid;

pub mod payload;
pub use payload::*;

use crate::models::Order;

/// Protocol version
pub const PROTOCOL_VERSION: u16 = 1;

/// Feed event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Client introduction, first message on every connection
    Handshake = 0,
    /// Client requests events for one restaurant scope
    JoinScope = 1,
    /// Server pushes a newly created order
    NewOrder = 2,
    /// Server-side informational notice
    Notification = 3,
    /// Acknowledgment of a client request
    Response = 4,
}

impl TryFrom<u8> for EventType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EventType::Handshake),
            1 => Ok(EventType::JoinScope),
            2 => Ok(EventType::NewOrder),
            3 => Ok(EventType::Notification),
            4 => Ok(EventType::Response),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Handshake => write!(f, "handshake"),
            EventType::JoinScope => write!(f, "join_scope"),
            EventType::NewOrder => write!(f, "new_order"),
            EventType::Notification => write!(f, "notification"),
            EventType::Response => write!(f, "response"),
        }
    }
}

/// Feed message envelope
///
/// Framed on the wire as: event type (1 byte), request id (16 bytes),
/// correlation id (16 bytes, nil = none), payload length (u32 LE),
/// JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    /// Set on responses, echoing the request id they answer
    pub correlation_id: Option<Uuid>,
    pub payload: Vec<u8>,
}

impl FeedMessage {
    pub fn new(event_type: EventType, payload: Vec<u8>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type,
            correlation_id: None,
            payload,
        }
    }

    /// Set the correlation ID (for request/response pairing)
    pub fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Create a handshake message
    pub fn handshake(payload: &HandshakePayload) -> Self {
        Self::new(
            EventType::Handshake,
            serde_json::to_vec(payload).expect("Failed to serialize handshake payload"),
        )
    }

    /// Create a join-scope message
    pub fn join_scope(payload: &JoinScopePayload) -> Self {
        Self::new(
            EventType::JoinScope,
            serde_json::to_vec(payload).expect("Failed to serialize join-scope payload"),
        )
    }

    /// Create a new-order push message
    pub fn new_order(order: &Order) -> Self {
        Self::new(
            EventType::NewOrder,
            serde_json::to_vec(order).expect("Failed to serialize order"),
        )
    }

    /// Create a notification message
    pub fn notification(payload: &NotificationPayload) -> Self {
        Self::new(
            EventType::Notification,
            serde_json::to_vec(payload).expect("Failed to serialize notification"),
        )
    }

    /// Create a response message
    pub fn response(payload: &ResponsePayload) -> Self {
        Self::new(
            EventType::Response,
            serde_json::to_vec(payload).expect("Failed to serialize response payload"),
        )
    }

    /// Parse the payload as the given type
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_roundtrip() {
        for raw in 0u8..=4 {
            let event = EventType::try_from(raw).unwrap();
            assert_eq!(event as u8, raw);
        }
        assert!(EventType::try_from(5).is_err());
    }

    #[test]
    fn test_handshake_message() {
        let payload = HandshakePayload {
            version: PROTOCOL_VERSION,
            client_name: Some("berg-client".to_string()),
            client_version: Some("0.1.0".to_string()),
        };

        let msg = FeedMessage::handshake(&payload);
        assert_eq!(msg.event_type, EventType::Handshake);
        assert!(!msg.request_id.is_nil());

        let parsed: HandshakePayload = msg.parse_payload().unwrap();
        assert_eq!(parsed.version, PROTOCOL_VERSION);
    }

    #[test]
    fn test_join_scope_message() {
        let msg = FeedMessage::join_scope(&JoinScopePayload {
            restaurant_id: "rest-42".to_string(),
        });

        let parsed: JoinScopePayload = msg.parse_payload().unwrap();
        assert_eq!(parsed.restaurant_id, "rest-42");
    }

    #[test]
    fn test_correlation_id() {
        let request = FeedMessage::join_scope(&JoinScopePayload {
            restaurant_id: "rest-1".to_string(),
        });
        let ack = FeedMessage::response(&ResponsePayload::success("joined"))
            .with_correlation_id(request.request_id);

        assert_eq!(ack.correlation_id, Some(request.request_id));
    }
}
