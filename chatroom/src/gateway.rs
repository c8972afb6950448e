use crate::{
    coordinator::OUTBOUND_CAPACITY,
    errors::{gateway_error::GatewayError, receive_frame_error::ReceiveFrameError},
    message::Message,
    receive_frame::FrameReader,
};
use chatroom_core::{
    InboundEvent, OutboundEvent, SessionId, errors::message_error::MessageError,
};
use core::str;
use log::{trace, warn};
use tokio::{
    io::AsyncWriteExt,
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
};

/// One participant's connection. Inbound frames are forwarded to the
/// coordinator, events queued for this session are written back out.
pub struct Gateway {
    pub session: SessionId,
    coordinator_tx: mpsc::Sender<Message>,
    outbound_rx: mpsc::Receiver<OutboundEvent>,
    frames: FrameReader<OwnedReadHalf>,
    wr: OwnedWriteHalf,
}

impl Gateway {
    pub async fn connect(
        session: SessionId,
        socket: TcpStream,
        coordinator_tx: mpsc::Sender<Message>,
    ) -> Result<Self, GatewayError> {
        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        coordinator_tx
            .send(Message::Connect {
                session,
                outbound_tx,
            })
            .await
            .or(Err(GatewayError::CoordinatorClosed))?;

        let (rd, wr) = socket.into_split();
        Ok(Gateway {
            session,
            coordinator_tx,
            outbound_rx,
            frames: FrameReader::new(rd),
            wr,
        })
    }

    pub async fn listen(&mut self) -> Result<(), GatewayError> {
        tokio::select! {
            frame = self.frames.receive_frame() => match frame {
                Ok(frame) => self.handle_client_frame(frame).await?,
                Err(ReceiveFrameError::TooLong(limit)) => {
                    warn!("Session {} sent a frame longer than {limit} bytes, dropped", self.session);
                    self.send_event(&OutboundEvent::error(MessageError::TooLong)).await?
                }
                Err(error) => return Err(error.into()),
            },

            event = self.outbound_rx.recv() => {
                self.send_event(&event.ok_or(GatewayError::OutboundClosed)?).await?
            }
        }

        Ok(())
    }

    async fn handle_client_frame(&mut self, frame: Vec<u8>) -> Result<(), GatewayError> {
        let Ok(frame) = str::from_utf8(&frame) else {
            warn!("Session {} sent a frame that is not UTF-8", self.session);
            return Ok(());
        };

        let frame = frame.trim();
        if frame.is_empty() {
            return Ok(());
        }

        trace!("C {}: {frame}", self.session);
        let event = match serde_json::from_str::<InboundEvent>(frame) {
            Ok(event) => event,
            Err(error) => {
                warn!("Ignoring malformed event from session {}: {error}", self.session);
                return Ok(());
            }
        };

        if event == InboundEvent::Disconnect {
            return Err(GatewayError::ClientDisconnected);
        }

        self.coordinator_tx
            .send(Message::Event {
                session: self.session,
                event,
            })
            .await
            .or(Err(GatewayError::CoordinatorClosed))
    }

    async fn send_event(&mut self, event: &OutboundEvent) -> Result<(), GatewayError> {
        let mut reply = serde_json::to_string(event)?;
        trace!("S {}: {reply}", self.session);

        reply.push('\n');
        self.wr.write_all(reply.as_bytes()).await?;
        Ok(())
    }
}
