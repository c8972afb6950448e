use super::receive_frame_error::ReceiveFrameError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Receive(#[from] ReceiveFrameError),
    #[error("Client asked to disconnect")]
    ClientDisconnected,
    #[error("Could not send to client over socket: {0}")]
    Write(#[from] std::io::Error),
    #[error("Could not serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Coordinator is no longer running")]
    CoordinatorClosed,
    #[error("Coordinator closed the outbound queue")]
    OutboundClosed,
}
