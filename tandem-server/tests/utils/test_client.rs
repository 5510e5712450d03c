use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use tandem_core::{ClientEvent, ConnectionId, IceServerConfig, ServerEvent};
use tandem_server::ServerConfig;

use super::signal_helpers::{SIGNAL_TIMEOUT_MS, SILENCE_MS};

/// Start a signaling server on an ephemeral local port.
pub async fn spawn_server(config: ServerConfig) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("Failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let shutdown = std::future::pending();
        if let Err(e) = tandem_server::serve(listener, &config, shutdown).await {
            tracing::error!("[TestServer] {:?}", e);
        }
    });

    Ok(addr)
}

/// Browser stand-in speaking the JSON protocol over a real WebSocket.
pub struct TestClient {
    /// Id assigned by the server in its welcome frame.
    pub connection_id: ConnectionId,
    /// ICE servers advertised right after the welcome.
    pub ice_servers: Vec<IceServerConfig>,
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the welcome and ICE config frames.
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (socket, _) = connect_async(format!("ws://{addr}/ws"))
            .await
            .context("WebSocket handshake failed")?;

        let mut client = Self {
            connection_id: ConnectionId::new(),
            ice_servers: Vec::new(),
            socket,
        };

        match client.recv().await? {
            ServerEvent::Welcome { connection_id } => client.connection_id = connection_id,
            other => anyhow::bail!("Expected welcome, got {:?}", other),
        }
        match client.recv().await? {
            ServerEvent::IceConfig { ice_servers } => client.ice_servers = ice_servers,
            other => anyhow::bail!("Expected ice_config, got {:?}", other),
        }

        Ok(client)
    }

    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.send_raw(&json).await
    }

    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.socket
            .send(Message::text(text.to_owned()))
            .await
            .context("Failed to send frame")
    }

    pub async fn join(&mut self, room: &str) -> Result<()> {
        self.send(&ClientEvent::Join(room.to_owned())).await
    }

    /// Next server event, skipping control frames.
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        let timeout = Duration::from_millis(SIGNAL_TIMEOUT_MS);

        loop {
            let msg = tokio::time::timeout(timeout, self.socket.next())
                .await
                .context("Timeout waiting for server event")?
                .context("Socket closed")??;

            if let Message::Text(text) = msg {
                return serde_json::from_str(text.as_str()).context("Unparseable server event");
            }
        }
    }

    /// Fails if a server event arrives within a short window.
    pub async fn expect_silence(&mut self) -> Result<()> {
        let window = Duration::from_millis(SILENCE_MS);
        match tokio::time::timeout(window, self.recv()).await {
            Ok(Ok(event)) => anyhow::bail!("Expected silence, got {:?}", event),
            _ => Ok(()),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await.context("Failed to close socket")
    }
}
