use crate::{
    effect::{Audience, Effect},
    events::{OutboundEvent, TypingNotice},
    session::{Session, SessionId},
};

/// Relays a typing toggle to everyone except the typist. Sessions that have
/// not joined are ignored.
pub fn relay(session: &Session, is_typing: bool, active: &[SessionId]) -> Option<Effect> {
    let username = session.name()?;

    Some(Effect::new(
        Audience::AllExcept(session.id),
        active,
        OutboundEvent::Typing(TypingNotice {
            username: username.to_string(),
            is_typing,
        }),
    ))
}
