use crate::{
    effect::{Audience, Effect},
    events::OutboundEvent,
    session::SessionId,
};

/// Announces `name` to everyone but `subject`, then resynchronizes every
/// active session with the full roster.
pub fn joined(name: &str, subject: SessionId, active: &[SessionId], roster: Vec<String>) -> Vec<Effect> {
    vec![
        Effect::new(
            Audience::AllExcept(subject),
            active,
            OutboundEvent::UserJoined(name.to_string()),
        ),
        Effect::new(Audience::All, active, OutboundEvent::UserList(roster)),
    ]
}

pub fn left(name: &str, subject: SessionId, active: &[SessionId], roster: Vec<String>) -> Vec<Effect> {
    vec![
        Effect::new(
            Audience::AllExcept(subject),
            active,
            OutboundEvent::UserLeft(name.to_string()),
        ),
        Effect::new(Audience::All, active, OutboundEvent::UserList(roster)),
    ]
}
