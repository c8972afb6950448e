use chatroom_core::{InboundEvent, OutboundEvent, SessionId};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

/// Everything the coordinator task can be asked to do. Messages are handled
/// one at a time in arrival order.
#[derive(Debug)]
pub enum Message {
    Connect {
        session: SessionId,
        outbound_tx: mpsc::Sender<OutboundEvent>,
    },

    Event {
        session: SessionId,
        event: InboundEvent,
    },

    Disconnect(SessionId),

    GetStats(oneshot::Sender<Stats>),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub users: usize,
    pub connections: usize,
}
