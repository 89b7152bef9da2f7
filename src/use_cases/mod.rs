// Use cases layer: application workflows for the game server.

pub mod broadcast;
pub mod game;
pub mod registry;
pub mod throttle;
pub mod types;

pub use game::{GameSettings, world_task};
pub use registry::{ConnectionHandle, ConnectionRegistry};
pub use types::{GameEvent, WorldView};
