use crate::room::RoomCommand;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, ConnectionId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let connection_id = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_connection(connection_id, tx);
    info!(
        "A user connected: {} ({} online)",
        connection_id,
        service.connection_count()
    );
    service.send_event(&connection_id, &ServerEvent::Welcome { connection_id });
    service.send_event(
        &connection_id,
        &ServerEvent::IceConfig {
            ice_servers: service.ice_servers(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let parsed = parse_command(&service, connection_id, text.as_str());
                        let Some(cmd) = parsed else {
                            continue;
                        };
                        if !service.submit(cmd).await {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Leave the room before the outbound channel disappears, whichever half failed.
    service
        .submit(RoomCommand::Disconnect { connection_id })
        .await;
    service.remove_connection(&connection_id);
    info!(
        "User disconnected: {} ({} online)",
        connection_id,
        service.connection_count()
    );
}

fn parse_command(
    service: &SignalingService,
    connection_id: ConnectionId,
    text: &str,
) -> Option<RoomCommand> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            warn!("Invalid ClientEvent from {}: {}", connection_id, e);
            service.send_event(
                &connection_id,
                &ServerEvent::error(format!("malformed frame: {e}")),
            );
            return None;
        }
    };

    let cmd = match event {
        ClientEvent::Join(room) => {
            info!("Connection {} joining room '{}'", connection_id, room);
            RoomCommand::Join {
                connection_id,
                room,
            }
        }
        signal => {
            let (room, kind, payload) = signal.into_signal()?;
            RoomCommand::Signal {
                connection_id,
                room,
                kind,
                payload,
            }
        }
    };

    Some(cmd)
}
