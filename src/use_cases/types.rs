// Use-case level inputs/outputs for the game loop.

use crate::domain::{Command, PlayerId, WorldSnapshot};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A connection opened; `outbound` receives that connection's per-tick views.
    Join {
        player_id: PlayerId,
        outbound: mpsc::Sender<WorldView>,
    },
    Leave {
        player_id: PlayerId,
    },
    Command {
        player_id: PlayerId,
        command: Command,
    },
}

/// One recipient's view of a tick: the shared snapshot plus which player is "you".
#[derive(Debug, Clone)]
pub struct WorldView {
    pub snapshot: Arc<WorldSnapshot>,
    pub you: PlayerId,
}
