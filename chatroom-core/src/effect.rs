//! Outbound effects produced by the room and their recipient snapshots.

use crate::{events::OutboundEvent, session::SessionId};

/// Who an outbound event is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Only(SessionId),
    All,
    AllExcept(SessionId),
}

impl Audience {
    pub fn resolve(&self, active: &[SessionId]) -> Vec<SessionId> {
        match self {
            Audience::Only(session) => vec![*session],
            Audience::All => active.to_vec(),
            Audience::AllExcept(excluded) => active
                .iter()
                .filter(|session| *session != excluded)
                .copied()
                .collect(),
        }
    }
}

/// An event bound to the sessions that were active when it was built.
/// Later joins never widen the recipient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub recipients: Vec<SessionId>,
    pub event: OutboundEvent,
}

impl Effect {
    pub fn new(audience: Audience, active: &[SessionId], event: OutboundEvent) -> Self {
        Effect {
            recipients: audience.resolve(active),
            event,
        }
    }

    pub fn targeted(session: SessionId, event: OutboundEvent) -> Self {
        Effect {
            recipients: vec![session],
            event,
        }
    }

    pub fn deliveries(&self) -> impl Iterator<Item = (SessionId, &OutboundEvent)> {
        self.recipients
            .iter()
            .map(move |session| (*session, &self.event))
    }
}
