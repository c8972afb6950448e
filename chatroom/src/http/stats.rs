use crate::message::{Message, Stats};
use axum::{Json, extract::State, http::StatusCode};
use log::error;
use tokio::sync::{mpsc, oneshot};

pub(crate) async fn stats(
    State(coordinator_tx): State<mpsc::Sender<Message>>,
) -> Result<Json<Stats>, StatusCode> {
    let (reply_tx, reply_rx) = oneshot::channel();
    if let Err(error) = coordinator_tx.send(Message::GetStats(reply_tx)).await {
        error!("Could not send GetStats message: {error}");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    reply_rx
        .await
        .map(Json)
        .or(Err(StatusCode::SERVICE_UNAVAILABLE))
}
