//! Broadcast gateway - fans board snapshots out to real-time clients

use super::events::ServerEvent;
use super::metrics;
use crate::domain::call::CallHistoryStore;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

/// Default number of undelivered events buffered per client
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Identifies one real-time connection
pub type ClientId = Uuid;

/// A freshly connected client
///
/// `events` was subscribed together with the `initial_state` snapshot, so
/// the client receives exactly the broadcasts newer than that snapshot.
pub struct ClientConnection {
    pub id: ClientId,
    pub initial_state: ServerEvent,
    pub events: broadcast::Receiver<ServerEvent>,
}

/// Owns the set of connected clients and pushes state to them
pub struct BroadcastGateway {
    store: Arc<CallHistoryStore>,
    tx: broadcast::Sender<ServerEvent>,
    clients: Mutex<HashMap<ClientId, DateTime<Utc>>>,
    /// Orders snapshot + send so clients never see an older state last
    publish: Mutex<()>,
}

impl BroadcastGateway {
    /// Create new gateway with specified per-client buffer capacity
    pub fn new(store: Arc<CallHistoryStore>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            store,
            tx,
            clients: Mutex::new(HashMap::new()),
            publish: Mutex::new(()),
        }
    }

    /// Register a client and hand it the current snapshot, for it alone
    pub fn connect(&self) -> ClientConnection {
        let (events, initial_state) = {
            let _publish = self.publish_guard();
            let events = self.tx.subscribe();
            (events, ServerEvent::CurrentState(self.store.current_state()))
        };
        let id = Uuid::new_v4();

        let count = {
            let mut clients = self.clients();
            clients.insert(id, Utc::now());
            clients.len()
        };
        metrics::set_connected_clients(count);
        info!("Display client {} connected ({} connected)", id, count);

        ClientConnection {
            id,
            initial_state,
            events,
        }
    }

    /// Forget a client; nothing is broadcast
    pub fn disconnect(&self, id: ClientId) {
        let (removed, count) = {
            let mut clients = self.clients();
            let removed = clients.remove(&id);
            (removed, clients.len())
        };

        if let Some(connected_at) = removed {
            metrics::set_connected_clients(count);
            let duration = Utc::now() - connected_at;
            info!(
                "Display client {} disconnected after {}s ({} connected)",
                id,
                duration.num_seconds(),
                count
            );
        }
    }

    /// Push one snapshot to every connected client
    ///
    /// Returns the number of clients the snapshot was queued for. Delivery
    /// to each client happens on its own task, so a dead connection never
    /// holds up the others. Snapshots are sent in the order they are taken,
    /// so the last event every client sees matches the store.
    pub fn broadcast_current_state(&self) -> usize {
        metrics::record_broadcast();

        let sent = {
            let _publish = self.publish_guard();
            let snapshot = self.store.current_state();
            self.tx.send(ServerEvent::CurrentState(snapshot))
        };

        match sent {
            Ok(receivers) => {
                debug!("Broadcast current state to {} clients", receivers);
                receivers
            }
            Err(_) => {
                debug!("No clients connected, broadcast skipped");
                0
            }
        }
    }

    /// Get number of connected clients
    pub fn client_count(&self) -> usize {
        self.clients().len()
    }

    // `send` never blocks, so holding this std mutex across it is cheap.
    fn publish_guard(&self) -> MutexGuard<'_, ()> {
        self.publish.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<ClientId, DateTime<Utc>>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
