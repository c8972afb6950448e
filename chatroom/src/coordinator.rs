//! The single writer of the chat room.
//!
//! Every gateway funnels its events into one channel and this task applies
//! them to the `Room` one after another, so no two events ever observe each
//! other half-applied.

use crate::message::{Message, Stats};
use chatroom_core::{Clock, Effect, OutboundEvent, Registry, Room, SessionId};
use log::{error, info, trace, warn};
use std::collections::{HashMap, VecDeque};
use tokio::sync::mpsc::{self, error::TrySendError};

pub const COORDINATOR_CAPACITY: usize = 256;

/// Events a session may have queued but not yet written. A session that
/// falls this far behind is disconnected.
pub const OUTBOUND_CAPACITY: usize = 64;

pub struct Coordinator<R, C> {
    room: Room<R, C>,
    outbound: HashMap<SessionId, mpsc::Sender<OutboundEvent>>,
}

impl<R: Registry, C: Clock> Coordinator<R, C> {
    pub fn new(room: Room<R, C>) -> Self {
        Coordinator {
            room,
            outbound: HashMap::new(),
        }
    }

    pub async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        while let Some(message) = rx.recv().await {
            self.process(message);
        }

        info!("Coordinator stopped, all senders dropped");
    }

    pub fn process(&mut self, message: Message) {
        match message {
            Message::Connect {
                session,
                outbound_tx,
            } => {
                let effects = self.room.connect(session);
                self.outbound.entry(session).or_insert(outbound_tx);
                self.deliver(effects);
            }

            Message::Event { session, event } => {
                trace!("C {session}: {event:?}");
                let effects = self.room.handle(session, event);
                self.deliver(effects);
            }

            Message::Disconnect(session) => {
                self.outbound.remove(&session);
                let effects = self.room.disconnect(session);
                self.deliver(effects);
            }

            Message::GetStats(reply_tx) => {
                let stats = Stats {
                    users: self.room.joined_count(),
                    connections: self.room.active_sessions().len(),
                };

                if reply_tx.send(stats).is_err() {
                    warn!("Stats requester went away before the reply");
                }
            }
        }
    }

    /// Queues every effect without waiting. Sessions whose queue is full are
    /// dropped and disconnected, and the resulting leave effects are
    /// delivered in turn.
    fn deliver(&mut self, effects: Vec<Effect>) {
        let mut pending = VecDeque::from(effects);

        while let Some(effect) = pending.pop_front() {
            let mut stalled = Vec::new();

            for (session, event) in effect.deliveries() {
                let Some(outbound_tx) = self.outbound.get(&session) else {
                    trace!("No outbound queue for session {session}");
                    continue;
                };

                match outbound_tx.try_send(event.clone()) {
                    Ok(()) => (),
                    Err(TrySendError::Full(_)) => stalled.push(session),
                    Err(TrySendError::Closed(_)) => {
                        error!("Could not queue event for session {session}: queue closed")
                    }
                }
            }

            for session in stalled {
                if self.outbound.remove(&session).is_some() {
                    warn!("Session {session} stopped reading, disconnecting");
                    pending.extend(self.room.disconnect(session));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatroom_core::{FixedClock, InboundEvent, MemoryRegistry, events::ChatMessageRequest};
    use tokio::sync::{mpsc::error::TryRecvError, oneshot};

    fn noon() -> FixedClock {
        FixedClock(
            "2024-05-01T12:00:00Z"
                .parse()
                .expect("valid RFC 3339 timestamp"),
        )
    }

    fn coordinator() -> Coordinator<MemoryRegistry, FixedClock> {
        Coordinator::new(Room::new(MemoryRegistry::new(), noon()))
    }

    fn connect_with_capacity(
        coordinator: &mut Coordinator<MemoryRegistry, FixedClock>,
        id: u64,
        capacity: usize,
    ) -> mpsc::Receiver<OutboundEvent> {
        let (outbound_tx, outbound_rx) = mpsc::channel(capacity);
        coordinator.process(Message::Connect {
            session: SessionId::new(id),
            outbound_tx,
        });
        outbound_rx
    }

    fn connect(
        coordinator: &mut Coordinator<MemoryRegistry, FixedClock>,
        id: u64,
    ) -> mpsc::Receiver<OutboundEvent> {
        connect_with_capacity(coordinator, id, OUTBOUND_CAPACITY)
    }

    fn event(id: u64, event: InboundEvent) -> Message {
        Message::Event {
            session: SessionId::new(id),
            event,
        }
    }

    fn stats(coordinator: &mut Coordinator<MemoryRegistry, FixedClock>) -> Stats {
        let (reply_tx, mut reply_rx) = oneshot::channel();
        coordinator.process(Message::GetStats(reply_tx));
        reply_rx.try_recv().unwrap()
    }

    #[test]
    fn delivers_effects_to_session_queues() {
        let mut coordinator = coordinator();
        let mut alice_rx = connect(&mut coordinator, 1);
        let mut bob_rx = connect(&mut coordinator, 2);

        coordinator.process(event(1, InboundEvent::Join("alice".to_string())));

        assert_eq!(
            alice_rx.try_recv().unwrap(),
            OutboundEvent::UserList(vec!["alice".to_string()])
        );
        assert_eq!(alice_rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(
            bob_rx.try_recv().unwrap(),
            OutboundEvent::UserJoined("alice".to_string())
        );
        assert_eq!(
            bob_rx.try_recv().unwrap(),
            OutboundEvent::UserList(vec!["alice".to_string()])
        );
    }

    #[test]
    fn repeated_disconnect_announces_once() {
        let mut coordinator = coordinator();
        let _alice_rx = connect(&mut coordinator, 1);
        let mut bob_rx = connect(&mut coordinator, 2);
        coordinator.process(event(1, InboundEvent::Join("alice".to_string())));
        while bob_rx.try_recv().is_ok() {}

        coordinator.process(Message::Disconnect(SessionId::new(1)));
        coordinator.process(Message::Disconnect(SessionId::new(1)));

        assert_eq!(
            bob_rx.try_recv().unwrap(),
            OutboundEvent::UserLeft("alice".to_string())
        );
        assert_eq!(bob_rx.try_recv().unwrap(), OutboundEvent::UserList(vec![]));
        assert_eq!(bob_rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn closed_queues_do_not_stop_delivery() {
        let mut coordinator = coordinator();
        let alice_rx = connect(&mut coordinator, 1);
        let mut bob_rx = connect(&mut coordinator, 2);
        coordinator.process(event(2, InboundEvent::Join("bob".to_string())));
        drop(alice_rx);

        coordinator.process(event(
            2,
            InboundEvent::ChatMessage(ChatMessageRequest {
                message: "anyone?".to_string(),
            }),
        ));

        assert!(matches!(bob_rx.try_recv().unwrap(), OutboundEvent::UserList(_)));
        assert!(matches!(bob_rx.try_recv().unwrap(), OutboundEvent::ChatMessage(_)));
    }

    #[test]
    fn session_that_stops_reading_is_disconnected() {
        let mut coordinator = coordinator();
        let mut alice_rx = connect_with_capacity(&mut coordinator, 1, 2);
        let mut bob_rx = connect(&mut coordinator, 2);

        coordinator.process(event(1, InboundEvent::Join("alice".to_string())));
        coordinator.process(event(2, InboundEvent::Join("bob".to_string())));

        assert_eq!(
            stats(&mut coordinator),
            Stats {
                users: 1,
                connections: 1
            }
        );

        assert_eq!(
            alice_rx.try_recv().unwrap(),
            OutboundEvent::UserList(vec!["alice".to_string()])
        );
        assert_eq!(
            alice_rx.try_recv().unwrap(),
            OutboundEvent::UserJoined("bob".to_string())
        );
        assert_eq!(alice_rx.try_recv(), Err(TryRecvError::Disconnected));

        let received: Vec<_> = std::iter::from_fn(|| bob_rx.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                OutboundEvent::UserJoined("alice".to_string()),
                OutboundEvent::UserList(vec!["alice".to_string()]),
                OutboundEvent::UserList(vec!["alice".to_string(), "bob".to_string()]),
                OutboundEvent::UserLeft("alice".to_string()),
                OutboundEvent::UserList(vec!["bob".to_string()]),
            ]
        );
    }

    #[test]
    fn reports_stats() {
        let mut coordinator = coordinator();
        let _alice_rx = connect(&mut coordinator, 1);
        let _bob_rx = connect(&mut coordinator, 2);
        coordinator.process(event(1, InboundEvent::Join("alice".to_string())));

        assert_eq!(
            stats(&mut coordinator),
            Stats {
                users: 1,
                connections: 2
            }
        );
    }
}
