// Connection registry owned by the world task.

use super::types::WorldView;
use crate::domain::PlayerId;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Why a view could not be queued for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// The connection is not draining its queue fast enough.
    Full,
    /// The connection task is gone; its `Leave` is on the way.
    Closed,
}

/// Outbound side of a single connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    pub id: PlayerId,
    outbound: mpsc::Sender<WorldView>,
}

impl ConnectionHandle {
    /// Queues a view without waiting; the tick loop never blocks on a slow connection.
    pub fn try_deliver(&self, view: WorldView) -> Result<(), DeliveryError> {
        self.outbound.try_send(view).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::Full,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}

/// Active connections keyed by connection id.
///
/// Only the world task holds the registry, so adds, removes, and broadcast walks are
/// serialized by construction.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<PlayerId, ConnectionHandle>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection, replacing any previous handle with the same id.
    pub fn add(&mut self, id: PlayerId, outbound: mpsc::Sender<WorldView>) -> ConnectionHandle {
        let handle = ConnectionHandle { id, outbound };
        self.connections.insert(id, handle.clone());
        handle
    }

    /// Returns whether the id was registered. Removing an unknown id is a no-op.
    pub fn remove(&mut self, id: PlayerId) -> bool {
        self.connections.remove(&id).is_some()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&ConnectionHandle),
    {
        for handle in self.connections.values() {
            visit(handle);
        }
    }
}
