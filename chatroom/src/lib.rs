use chatroom_core::{MemoryRegistry, Room, SessionId, SystemClock};
use config::Config;
use coordinator::{COORDINATOR_CAPACITY, Coordinator};
use errors::{
    gateway_error::GatewayError, receive_frame_error::ReceiveFrameError, server_error::ServerError,
};
use gateway::Gateway;
use log::{error, info, trace, warn};
use message::Message;
use tokio::{net::TcpListener, sync::mpsc};

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod gateway;
pub mod http;
pub mod message;
pub mod receive_frame;

/// Binds the chat and HTTP listeners from `config` and serves them forever
pub async fn listen(config: Config) -> Result<(), ServerError> {
    let chat_listener = bind(&config.chat_address.to_string()).await?;
    info!("Chat server listening on {}", config.chat_address);

    let http_listener = bind(&config.http_address.to_string()).await?;
    info!("HTTP server listening on {}", config.http_address);

    serve(chat_listener, http_listener, config).await;
    Ok(())
}

async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Runs the room on already bound listeners. The addresses in `config` are
/// not used.
pub async fn serve(chat_listener: TcpListener, http_listener: TcpListener, config: Config) {
    let (coordinator_tx, coordinator_rx) = mpsc::channel::<Message>(COORDINATOR_CAPACITY);
    let room = Room::new(
        MemoryRegistry::with_matching(config.name_matching),
        SystemClock,
    );

    tokio::spawn(Coordinator::new(room).run(coordinator_rx));
    tokio::spawn(http::listen(
        http_listener,
        coordinator_tx.clone(),
        config.frontend_url,
    ));

    let mut last_session_id: u64 = 0;

    loop {
        let (socket, address) = match chat_listener.accept().await {
            Ok(c) => c,
            Err(error) => {
                error!("Could not get socket from accepted chat connection: {error}");
                continue;
            }
        };

        last_session_id += 1;
        let session = SessionId::new(last_session_id);
        let coordinator_tx = coordinator_tx.clone();
        trace!("Session {session} opened from {address}");

        tokio::spawn(async move {
            let mut gateway = match Gateway::connect(session, socket, coordinator_tx.clone()).await {
                Ok(gateway) => gateway,
                Err(error) => {
                    error!("Could not admit session {session}: {error}");
                    return;
                }
            };

            loop {
                if let Err(error) = gateway.listen().await {
                    match error {
                        GatewayError::Receive(ReceiveFrameError::Disconnected)
                        | GatewayError::ClientDisconnected => trace!("Session {session}: {error}"),
                        GatewayError::OutboundClosed => warn!("Session {session}: {error}"),
                        _ => error!("Session {session}: {error}"),
                    }
                    break;
                }
            }

            if let Err(error) = coordinator_tx.send(Message::Disconnect(session)).await {
                error!("Could not send disconnect for session {session}: {error}");
            }
        });
    }
}
