//! The authoritative mapping from session to display name.

use crate::{errors::join_error::JoinError, sanitizer::sanitize, session::SessionId};
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_NAME_LENGTH: usize = 20;

static NAME_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^[A-Za-z0-9_]{{{MIN_NAME_LENGTH},{MAX_NAME_LENGTH}}}$"
    ))
    .expect("Name format regex is invalid")
});

/// Owner of the session to name mapping. All mutation goes through
/// `register` and `unregister`; implementations must make the uniqueness
/// check and the insertion in `register` a single step with respect to
/// every other call.
pub trait Registry {
    /// Validates, trims and sanitizes `proposed_name`, then binds it to
    /// `session`. Returns the stored name.
    fn register(&mut self, session: SessionId, proposed_name: &str) -> Result<String, JoinError>;

    /// Removes the entry for `session`, if any.
    fn unregister(&mut self, session: SessionId) -> Option<String>;

    /// Registered names in insertion order.
    fn snapshot(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How two names are compared when checking for duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    #[default]
    Exact,
    CaseInsensitive,
}

impl NameMatching {
    fn collides(&self, a: &str, b: &str) -> bool {
        match self {
            NameMatching::Exact => a == b,
            NameMatching::CaseInsensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryRegistry {
    entries: Vec<(SessionId, String)>,
    matching: NameMatching,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        MemoryRegistry::default()
    }

    pub fn with_matching(matching: NameMatching) -> Self {
        MemoryRegistry {
            entries: Vec::new(),
            matching,
        }
    }
}

pub fn validate_name(name: &str) -> Result<(), JoinError> {
    if NAME_FORMAT.is_match(name) {
        Ok(())
    } else {
        Err(JoinError::InvalidFormat)
    }
}

impl Registry for MemoryRegistry {
    fn register(&mut self, session: SessionId, proposed_name: &str) -> Result<String, JoinError> {
        let trimmed = proposed_name.trim();
        validate_name(trimmed)?;
        let name = sanitize(trimmed);

        if self
            .entries
            .iter()
            .any(|(_, existing)| self.matching.collides(existing, &name))
        {
            return Err(JoinError::DuplicateName);
        }

        match self.entries.iter_mut().find(|(id, _)| *id == session) {
            Some(entry) => entry.1 = name.clone(),
            None => self.entries.push((session, name.clone())),
        }

        Ok(name)
    }

    fn unregister(&mut self, session: SessionId) -> Option<String> {
        let index = self.entries.iter().position(|(id, _)| *id == session)?;
        Some(self.entries.remove(index).1)
    }

    fn snapshot(&self) -> Vec<String> {
        self.entries.iter().map(|(_, name)| name.clone()).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
