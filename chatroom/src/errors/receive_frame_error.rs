use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReceiveFrameError {
    #[error("Client disconnected")]
    Disconnected,
    #[error("Client sent a frame longer than {0} bytes")]
    TooLong(usize),
}
