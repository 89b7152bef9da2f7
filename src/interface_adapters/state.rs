use crate::use_cases::GameEvent;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    // Joins, leaves, and decoded commands flowing into the world task.
    pub input_tx: mpsc::Sender<GameEvent>,
    // Per-connection queue depth for outgoing world views.
    pub outbound_capacity: usize,
}
