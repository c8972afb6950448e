use std::fmt;

/// Opaque connection identifier handed out by the transport. Identifiers are
/// never reused for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(id: u64) -> Self {
        SessionId(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Joined(String),
    Terminated,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    state: SessionState,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Session {
            id,
            state: SessionState::Connected,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Joined(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.state, SessionState::Joined(_))
    }

    /// Moves a `Connected` session to `Joined`. Returns false, leaving the
    /// state untouched, from any other state.
    pub fn join(&mut self, name: String) -> bool {
        if self.state != SessionState::Connected {
            return false;
        }

        self.state = SessionState::Joined(name);
        true
    }

    /// Moves the session to `Terminated` and returns the state it left.
    pub fn terminate(&mut self) -> SessionState {
        std::mem::replace(&mut self.state, SessionState::Terminated)
    }
}
