use crate::{
    clock::Clock,
    effect::{Audience, Effect},
    errors::message_error::MessageError,
    events::{ChatMessage, OutboundEvent},
    sanitizer::sanitize,
    session::{Session, SessionId},
};

pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Validates a chat message from `sender` and addresses it to every active
/// session, the sender included.
pub fn submit(
    sender: &Session,
    raw_text: &str,
    clock: &impl Clock,
    active: &[SessionId],
) -> Result<Effect, MessageError> {
    let username = sender.name().ok_or(MessageError::Unauthorized)?;

    let text = raw_text.trim();
    if text.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(MessageError::TooLong);
    }

    let message = ChatMessage {
        username: username.to_string(),
        message: sanitize(text),
        timestamp: clock.now(),
    };

    Ok(Effect::new(
        Audience::All,
        active,
        OutboundEvent::ChatMessage(message),
    ))
}
