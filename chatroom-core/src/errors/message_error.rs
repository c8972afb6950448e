use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageError {
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Message too long. Maximum 500 characters.")]
    TooLong,
}
