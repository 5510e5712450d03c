use crate::error::ForwardError;
use crate::room::{Outbound, RoomRegistry};
use serde_json::Value;
use tandem_core::{ConnectionId, ServerEvent, SignalKind};

/// Addresses a negotiation payload to every other member of the sender's room.
///
/// The payload is passed through untouched. Nothing is buffered or retried;
/// an empty result simply means the peer has not arrived yet.
pub fn forward(
    registry: &RoomRegistry,
    sender: &ConnectionId,
    room: &str,
    kind: SignalKind,
    payload: Value,
) -> Result<Vec<Outbound>, ForwardError> {
    let recipients = registry.recipients(sender, room)?;

    Ok(recipients
        .into_iter()
        .map(|to| Outbound::new(to, ServerEvent::signal(kind, payload.clone())))
        .collect())
}
