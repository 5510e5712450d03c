use crate::error::JoinError;
use crate::room::signal_relay;
use crate::room::{Outbound, RoleAssignment, RoomCommand, RoomRegistry};
use crate::signaling::SignalingOutput;
use std::sync::Arc;
use tandem_core::ServerEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Sole owner of the room registry.
///
/// Commands from every socket are funnelled through one channel and applied
/// in order, so membership changes never race. Outbound events are handed to
/// the signaling layer only after the registry has been updated.
pub struct RoomManager {
    registry: RoomRegistry,
    command_rx: mpsc::Receiver<RoomCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl RoomManager {
    pub fn new(
        command_rx: mpsc::Receiver<RoomCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry: RoomRegistry::new(),
            command_rx,
            signaling,
        }
    }

    /// Creates the command channel and runs a manager on it in the background.
    ///
    /// `build` receives a sender for the new channel and returns the output the
    /// manager delivers to, which usually needs that sender itself.
    pub fn spawn<S, F>(
        buffer: usize,
        build: F,
    ) -> anyhow::Result<(mpsc::Sender<RoomCommand>, S, JoinHandle<()>)>
    where
        S: SignalingOutput + Clone + 'static,
        F: FnOnce(mpsc::Sender<RoomCommand>) -> S,
    {
        if buffer == 0 {
            anyhow::bail!("room command buffer must be at least 1");
        }

        let (tx, rx) = mpsc::channel(buffer);
        let signaling = build(tx.clone());
        let handle = tokio::spawn(Self::new(rx, Arc::new(signaling.clone())).run());
        Ok((tx, signaling, handle))
    }

    pub async fn run(mut self) {
        info!("Room manager started");

        while let Some(cmd) = self.command_rx.recv().await {
            for outbound in Self::transition(&mut self.registry, cmd) {
                self.signaling.deliver(outbound.to, outbound.event).await;
            }
        }

        info!(
            "Command channel closed, room manager stopping with {} live rooms",
            self.registry.room_count()
        );
    }

    /// Applies one command to the registry and returns what has to be sent, and to whom.
    pub fn transition(registry: &mut RoomRegistry, cmd: RoomCommand) -> Vec<Outbound> {
        match cmd {
            RoomCommand::Join {
                connection_id,
                room,
            } => match registry.join(connection_id, &room) {
                Ok((name, RoleAssignment::Created)) => {
                    info!("Connection {} created room {}", connection_id, name);
                    vec![Outbound::new(connection_id, ServerEvent::Created)]
                }
                Ok((name, RoleAssignment::JoinedReady { peer })) => {
                    info!("Connection {} joined room {}", connection_id, name);
                    vec![
                        Outbound::new(connection_id, ServerEvent::Joined),
                        Outbound::new(peer, ServerEvent::Ready),
                    ]
                }
                Err(JoinError::RoomFull { room }) => {
                    info!(
                        "Connection {} turned away from full room {}",
                        connection_id, room
                    );
                    vec![Outbound::new(connection_id, ServerEvent::Full { room })]
                }
                Err(e @ JoinError::MissingRoomName) => {
                    debug!("Rejected join from {}: {}", connection_id, e);
                    vec![Outbound::new(
                        connection_id,
                        ServerEvent::error(e.to_string()),
                    )]
                }
            },

            RoomCommand::Signal {
                connection_id,
                room,
                kind,
                payload,
            } => match signal_relay::forward(
                registry,
                &connection_id,
                &room,
                kind,
                payload,
            ) {
                Ok(outbound) => {
                    debug!(
                        "Relaying {} from {} in room {} to {} peer(s)",
                        kind,
                        connection_id,
                        room,
                        outbound.len()
                    );
                    outbound
                }
                Err(e) => {
                    debug!("Dropping {} from {}: {}", kind, connection_id, e);
                    Vec::new()
                }
            },

            RoomCommand::Disconnect { connection_id } => {
                if let Some(departure) = registry.leave(&connection_id) {
                    info!(
                        "Connection {} left room {} ({} remaining)",
                        connection_id, departure.room, departure.remaining
                    );
                }
                Vec::new()
            }
        }
    }
}
