use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    #[error("Invalid username. Must be 2-20 characters: letters, numbers or underscores.")]
    InvalidFormat,
    #[error("Username already taken. Please choose another.")]
    DuplicateName,
}
