// Domain layer: core simulation types and rules.

pub mod command;
pub mod rotation;
pub mod state;
pub mod systems;
pub mod tuning;
pub mod world;

pub use command::Command;
pub use rotation::Rotation;
pub use state::{
    Bounds, Bullet, BulletSnapshot, GameStatus, Intent, Player, PlayerId, PlayerSnapshot,
    PlayerStatus, WorldSnapshot,
};
pub use world::{TickReport, World};
