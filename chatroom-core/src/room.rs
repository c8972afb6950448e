//! Dispatcher for the events of a single chat room.
//!
//! A `Room` processes one event at a time and hands back the effects it
//! produced. It holds no locks: whoever owns it must feed it from a single
//! event stream, which is what makes the check-then-insert in
//! [`Registry::register`] atomic.

use crate::{
    broadcaster,
    clock::{Clock, SystemClock},
    effect::Effect,
    events::{InboundEvent, OutboundEvent},
    presence,
    registry::{MemoryRegistry, Registry},
    session::{Session, SessionId, SessionState},
    typing,
};
use log::{info, trace, warn};
use std::collections::BTreeMap;

pub struct Room<R = MemoryRegistry, C = SystemClock> {
    registry: R,
    clock: C,
    sessions: BTreeMap<SessionId, Session>,
}

impl<R: Registry, C: Clock> Room<R, C> {
    pub fn new(registry: R, clock: C) -> Self {
        Room {
            registry,
            clock,
            sessions: BTreeMap::new(),
        }
    }

    /// Admits a freshly connected, not yet joined session.
    pub fn connect(&mut self, session: SessionId) -> Vec<Effect> {
        if self.sessions.contains_key(&session) {
            warn!("Session {session} connected twice");
            return Vec::new();
        }

        trace!("New user connected: {session}");
        self.sessions.insert(session, Session::new(session));
        Vec::new()
    }

    pub fn handle(&mut self, session: SessionId, event: InboundEvent) -> Vec<Effect> {
        match event {
            InboundEvent::Join(name) => self.join(session, &name),
            InboundEvent::ChatMessage(request) => self.chat_message(session, &request.message),
            InboundEvent::Typing(is_typing) => self.typing(session, is_typing),
            InboundEvent::Disconnect => self.disconnect(session),
        }
    }

    pub fn join(&mut self, session: SessionId, proposed_name: &str) -> Vec<Effect> {
        let Some(current) = self.sessions.get(&session) else {
            return Vec::new();
        };

        if current.is_joined() {
            warn!("Session {session} tried to join twice");
            return Vec::new();
        }

        let name = match self.registry.register(session, proposed_name) {
            Ok(name) => name,
            Err(error) => {
                warn!("Session {session} could not join: {error}");
                return vec![Effect::targeted(session, OutboundEvent::error(error))];
            }
        };

        let joined = self
            .sessions
            .get_mut(&session)
            .is_some_and(|current| current.join(name.clone()));
        if !joined {
            warn!("Session {session} left before joining as {name}");
            self.registry.unregister(session);
            return Vec::new();
        }

        info!("User {name} joined the chat");
        presence::joined(
            &name,
            session,
            &self.active_sessions(),
            self.registry.snapshot(),
        )
    }

    pub fn chat_message(&mut self, session: SessionId, raw_text: &str) -> Vec<Effect> {
        let Some(sender) = self.sessions.get(&session) else {
            return Vec::new();
        };

        match broadcaster::submit(sender, raw_text, &self.clock, &self.active_sessions()) {
            Ok(effect) => vec![effect],
            Err(error) => {
                warn!("Message from session {session} rejected: {error}");
                vec![Effect::targeted(session, OutboundEvent::error(error))]
            }
        }
    }

    pub fn typing(&mut self, session: SessionId, is_typing: bool) -> Vec<Effect> {
        let Some(typist) = self.sessions.get(&session) else {
            return Vec::new();
        };

        typing::relay(typist, is_typing, &self.active_sessions())
            .into_iter()
            .collect()
    }

    /// Terminates the session. Safe to call any number of times; only the
    /// first call for a joined session announces the departure.
    pub fn disconnect(&mut self, session: SessionId) -> Vec<Effect> {
        let Some(mut terminated) = self.sessions.remove(&session) else {
            return Vec::new();
        };

        let previous = terminated.terminate();
        self.registry.unregister(session);
        trace!("User disconnected: {session}");

        let SessionState::Joined(name) = previous else {
            return Vec::new();
        };

        info!("User {name} left the chat");
        presence::left(
            &name,
            session,
            &self.active_sessions(),
            self.registry.snapshot(),
        )
    }

    /// Sessions that have not been terminated, joined or not.
    pub fn active_sessions(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    pub fn roster(&self) -> Vec<String> {
        self.registry.snapshot()
    }

    pub fn joined_count(&self) -> usize {
        self.registry.len()
    }

    pub fn session(&self, session: SessionId) -> Option<&Session> {
        self.sessions.get(&session)
    }
}
