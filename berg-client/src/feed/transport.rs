use async_trait::async_trait;
use rustls::ClientConfig;
use rustls_pki_types::ServerName;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, broadcast};
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use uuid::Uuid;

use crate::feed::FeedError;
use shared::message::{EventType, FeedMessage};

/// Transport abstraction for the order feed
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn read_message(&self) -> Result<FeedMessage, FeedError>;
    async fn write_message(&self, msg: &FeedMessage) -> Result<(), FeedError>;
    async fn close(&self) -> Result<(), FeedError>;
}

async fn read_frame<R: tokio::io::AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<FeedMessage, FeedError> {
    // Event type (1 byte)
    let mut type_buf = [0u8; 1];
    reader.read_exact(&mut type_buf).await.map_err(FeedError::Io)?;

    let event_type = EventType::try_from(type_buf[0])
        .map_err(|_| FeedError::InvalidMessage("Invalid event type".into()))?;

    // Request ID (16 bytes)
    let mut uuid_buf = [0u8; 16];
    reader.read_exact(&mut uuid_buf).await.map_err(FeedError::Io)?;
    let request_id = Uuid::from_bytes(uuid_buf);

    // Correlation ID (16 bytes, nil = none)
    let mut correlation_buf = [0u8; 16];
    reader
        .read_exact(&mut correlation_buf)
        .await
        .map_err(FeedError::Io)?;
    let correlation_id_raw = Uuid::from_bytes(correlation_buf);
    let correlation_id = if correlation_id_raw.is_nil() {
        None
    } else {
        Some(correlation_id_raw)
    };

    // Payload length (4 bytes)
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(FeedError::Io)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    // Payload
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(FeedError::Io)?;

    Ok(FeedMessage {
        request_id,
        event_type,
        correlation_id,
        payload,
    })
}

fn encode_frame(msg: &FeedMessage) -> Vec<u8> {
    let mut data = Vec::with_capacity(1 + 16 + 16 + 4 + msg.payload.len());
    data.push(msg.event_type as u8);
    data.extend_from_slice(msg.request_id.as_bytes());

    let correlation_bytes = msg.correlation_id.unwrap_or(Uuid::nil()).into_bytes();
    data.extend_from_slice(&correlation_bytes);

    data.extend_from_slice(&(msg.payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&msg.payload);
    data
}

/// TCP Transport Implementation
#[derive(Debug, Clone)]
pub struct TcpTransport {
    reader: Arc<Mutex<OwnedReadHalf>>,
    writer: Arc<Mutex<OwnedWriteHalf>>,
}

impl TcpTransport {
    pub async fn connect(addr: &str) -> Result<Self, FeedError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| FeedError::Connection(e.to_string()))?;
        let (reader, writer) = stream.into_split();
        Ok(Self {
            reader: Arc::new(Mutex::new(reader)),
            writer: Arc::new(Mutex::new(writer)),
        })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn read_message(&self) -> Result<FeedMessage, FeedError> {
        let mut reader = self.reader.lock().await;
        read_frame(&mut *reader).await
    }

    async fn write_message(&self, msg: &FeedMessage) -> Result<(), FeedError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(&encode_frame(msg))
            .await
            .map_err(FeedError::Io)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), FeedError> {
        let mut writer = self.writer.lock().await;
        writer.shutdown().await.map_err(FeedError::Io)?;
        Ok(())
    }
}

/// TLS Transport Implementation
#[derive(Debug, Clone)]
pub struct TlsTransport {
    reader: Arc<Mutex<tokio::io::ReadHalf<TlsStream<TcpStream>>>>,
    writer: Arc<Mutex<tokio::io::WriteHalf<TlsStream<TcpStream>>>>,
}

impl TlsTransport {
    pub async fn connect(
        addr: &str,
        domain: &str,
        config: ClientConfig,
    ) -> Result<Self, FeedError> {
        let connector = TlsConnector::from(Arc::new(config));
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| FeedError::Connection(e.to_string()))?;

        let domain = ServerName::try_from(domain)
            .map_err(|e| FeedError::Connection(format!("Invalid domain: {}", e)))?
            .to_owned();

        let stream = connector
            .connect(domain, stream)
            .await
            .map_err(|e| FeedError::Connection(format!("TLS handshake failed: {}", e)))?;

        let (reader, writer) = tokio::io::split(stream);

        Ok(Self {
            reader: Arc::new(Mutex::new(reader)),
            writer: Arc::new(Mutex::new(writer)),
        })
    }
}

#[async_trait]
impl Transport for TlsTransport {
    async fn read_message(&self) -> Result<FeedMessage, FeedError> {
        let mut reader = self.reader.lock().await;
        read_frame(&mut *reader).await
    }

    async fn write_message(&self, msg: &FeedMessage) -> Result<(), FeedError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(&encode_frame(msg))
            .await
            .map_err(FeedError::Io)?;
        Ok(())
    }

    async fn close(&self) -> Result<(), FeedError> {
        let mut writer = self.writer.lock().await;
        writer.shutdown().await.map_err(FeedError::Io)?;
        Ok(())
    }
}

/// Memory Transport Implementation (for tests and in-process wiring)
#[derive(Debug, Clone)]
pub struct MemoryTransport {
    /// Receiver for messages FROM the server (broadcasts)
    rx: Arc<Mutex<broadcast::Receiver<FeedMessage>>>,
    /// Sender for messages TO the server
    tx: broadcast::Sender<FeedMessage>,
}

impl MemoryTransport {
    /// Create a new memory transport
    ///
    /// # Arguments
    /// * `server_tx` - the server's broadcast sender (subscribed for pushes)
    /// * `client_tx` - the channel carrying client messages to the server
    pub fn new(
        server_tx: &broadcast::Sender<FeedMessage>,
        client_tx: &broadcast::Sender<FeedMessage>,
    ) -> Self {
        Self {
            rx: Arc::new(Mutex::new(server_tx.subscribe())),
            tx: client_tx.clone(),
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn read_message(&self) -> Result<FeedMessage, FeedError> {
        let mut rx = self.rx.lock().await;
        rx.recv()
            .await
            .map_err(|e| FeedError::Connection(format!("Memory channel error: {}", e)))
    }

    async fn write_message(&self, msg: &FeedMessage) -> Result<(), FeedError> {
        self.tx
            .send(msg.clone())
            .map_err(|e| FeedError::Connection(format!("Failed to send to server: {}", e)))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), FeedError> {
        Ok(())
    }
}
