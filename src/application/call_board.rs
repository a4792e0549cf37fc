//! Call board use case - accept a call and push the new state out

use super::gateway::BroadcastGateway;
use super::metrics;
use crate::domain::call::{Call, CallHistoryStore, CallRequest, CurrentState};
use crate::domain::shared::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Where a call submission came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSource {
    /// `POST /api/call_number`
    Http,
    /// `call_number` event on the real-time channel
    WebSocket,
}

impl CallSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallSource::Http => "http",
            CallSource::WebSocket => "websocket",
        }
    }
}

/// Shared by the HTTP and real-time adapters
pub struct CallBoardService {
    store: Arc<CallHistoryStore>,
    gateway: Arc<BroadcastGateway>,
}

impl CallBoardService {
    pub fn new(store: Arc<CallHistoryStore>, gateway: Arc<BroadcastGateway>) -> Self {
        Self { store, gateway }
    }

    /// Validate, record and broadcast a call
    ///
    /// Invalid requests leave the history untouched and broadcast nothing.
    pub fn submit(&self, request: &CallRequest, source: CallSource) -> Result<Call> {
        let validated = match request.validate() {
            Ok(validated) => validated,
            Err(e) => {
                warn!("Rejected call from {}: {}", source.as_str(), e);
                metrics::record_rejected_call(source.as_str());
                return Err(e);
            }
        };

        let call = self.store.add_call(validated);
        metrics::record_call(source.as_str());

        let reached = self.gateway.broadcast_current_state();
        info!(
            "Calling number {} to {} (via {}, {} displays)",
            call.number(),
            call.counter(),
            source.as_str(),
            reached
        );

        Ok(call)
    }

    pub fn current_state(&self) -> CurrentState {
        self.store.current_state()
    }

    pub fn store(&self) -> &Arc<CallHistoryStore> {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<BroadcastGateway> {
        &self.gateway
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::ServerEvent;
    use crate::application::gateway::{ClientConnection, DEFAULT_CHANNEL_CAPACITY};
    use std::thread;
    use tokio::sync::broadcast::error::TryRecvError;

    fn service() -> CallBoardService {
        let store = Arc::new(CallHistoryStore::default());
        let gateway = Arc::new(BroadcastGateway::new(store.clone(), DEFAULT_CHANNEL_CAPACITY));
        CallBoardService::new(store, gateway)
    }

    #[tokio::test]
    async fn test_submit_broadcasts_once() {
        let service = service();
        let mut rx = service.gateway().connect().events;

        let call = service
            .submit(&CallRequest::new("12", "Counter 1"), CallSource::Http)
            .unwrap();
        assert_eq!(call.number().as_str(), "12");

        match rx.recv().await.unwrap() {
            ServerEvent::CurrentState(state) => assert_eq!(state.current, Some(call)),
            other => panic!("Wrong event type: {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_submit_leaves_state_unchanged() {
        let service = service();
        service
            .submit(&CallRequest::new("1", "A"), CallSource::WebSocket)
            .unwrap();
        let before = service.current_state();
        let mut rx = service.gateway().connect().events;

        for request in [
            CallRequest::new("", "A"),
            CallRequest::new("5", ""),
            CallRequest::new("x".repeat(51), "A"),
            CallRequest::default(),
        ] {
            let err = service.submit(&request, CallSource::Http).unwrap_err();
            assert!(err.is_validation());
        }

        assert_eq!(service.current_state(), before);
        assert!(rx.try_recv().is_err());
    }

    /// Last state a client ends up showing: its newest event, or the
    /// snapshot it connected with if nothing arrived after
    fn final_state(conn: ClientConnection) -> ServerEvent {
        let ClientConnection {
            initial_state,
            mut events,
            ..
        } = conn;
        let mut last = initial_state;
        loop {
            match events.try_recv() {
                Ok(event) => last = event,
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        last
    }

    #[test]
    fn test_racing_submits_leave_displays_on_latest_state() {
        for round in 0..50 {
            let store = Arc::new(CallHistoryStore::default());
            let gateway = Arc::new(BroadcastGateway::new(store.clone(), 1024));
            let service = Arc::new(CallBoardService::new(store, gateway));
            let early = service.gateway().connect();

            let submitters: Vec<_> = (0..16)
                .map(|t| {
                    let service = service.clone();
                    thread::spawn(move || {
                        for i in 0..50 {
                            service
                                .submit(
                                    &CallRequest::new(format!("{}-{}", t, i), "A"),
                                    CallSource::WebSocket,
                                )
                                .unwrap();
                        }
                    })
                })
                .collect();

            // Connects while calls are in flight
            let late_service = service.clone();
            let late = thread::spawn(move || {
                thread::yield_now();
                late_service.gateway().connect()
            });

            for handle in submitters {
                handle.join().unwrap();
            }
            let late = late.join().unwrap();

            let expected = ServerEvent::CurrentState(service.current_state());
            assert_eq!(final_state(early), expected, "round {}: early client", round);
            assert_eq!(final_state(late), expected, "round {}: late client", round);
        }
    }
}
