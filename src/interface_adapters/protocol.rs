// Wire protocol DTOs and conversions for public game server messages.
// Client -> server traffic is plain text tokens (see `domain::command`); only the server side
// speaks JSON.

use crate::domain::{Bounds, BulletSnapshot, GameStatus, PlayerSnapshot, PlayerStatus, Rotation};
use crate::use_cases::WorldView;
use serde::{Deserialize, Serialize};

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Assigned identity for the connection, sent once right after the upgrade.
    Identity { player_id: String },
    // Personalized snapshot of the world for a given tick.
    WorldUpdate(WorldUpdateDto),
}

/// Snapshot of the world sent to one client on each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldUpdateDto {
    pub tick: u64,
    pub players: Vec<PlayerStateDto>,
    #[serde(default)]
    pub bullets: Vec<BulletStateDto>,
    pub status: GameStatusDto,
    pub bounds: BoundsDto,
    // The recipient's own player id.
    pub you: String,
}

impl From<&WorldView> for WorldUpdateDto {
    fn from(view: &WorldView) -> Self {
        let snapshot = &view.snapshot;
        Self {
            tick: snapshot.tick,
            players: snapshot.players.iter().map(PlayerStateDto::from).collect(),
            bullets: snapshot.bullets.iter().map(BulletStateDto::from).collect(),
            status: snapshot.status.into(),
            bounds: snapshot.bounds.into(),
            you: view.you.to_string(),
        }
    }
}

/// Flattened player state. Ids travel as strings so 64-bit values survive JS clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateDto {
    pub id: String,
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub acceleration: f64,
    pub velocity: f64,
    pub rotation: RotationDto,
    pub life: f64,
    pub power: f64,
    pub reload: f64,
    pub status: PlayerStatusDto,
    pub score: u32,
}

impl From<&PlayerSnapshot> for PlayerStateDto {
    fn from(p: &PlayerSnapshot) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            x: p.x,
            y: p.y,
            left: p.intent.left,
            right: p.intent.right,
            up: p.intent.up,
            down: p.intent.down,
            fire: p.intent.fire,
            acceleration: p.acceleration,
            velocity: p.velocity,
            rotation: p.rotation.into(),
            life: p.life,
            power: p.power,
            reload: p.reload,
            status: p.status.into(),
            score: p.score,
        }
    }
}

/// Flattened bullet state for wire transmission in world updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletStateDto {
    pub id: String,
    pub owner_id: String,
    pub x: f64,
    pub y: f64,
    pub rotation: RotationDto,
    pub damage: f64,
    pub speed: f64,
}

impl From<&BulletSnapshot> for BulletStateDto {
    fn from(b: &BulletSnapshot) -> Self {
        Self {
            id: b.id.to_string(),
            owner_id: b.owner_id.to_string(),
            x: b.x,
            y: b.y,
            rotation: b.rotation.into(),
            damage: b.damage,
            speed: b.speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsDto {
    pub width: f64,
    pub height: f64,
}

impl From<Bounds> for BoundsDto {
    fn from(b: Bounds) -> Self {
        Self {
            width: b.width,
            height: b.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDto {
    Up,
    Down,
    Left,
    Right,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl From<Rotation> for RotationDto {
    fn from(r: Rotation) -> Self {
        match r {
            Rotation::Up => RotationDto::Up,
            Rotation::Down => RotationDto::Down,
            Rotation::Left => RotationDto::Left,
            Rotation::Right => RotationDto::Right,
            Rotation::LeftUp => RotationDto::LeftUp,
            Rotation::LeftDown => RotationDto::LeftDown,
            Rotation::RightUp => RotationDto::RightUp,
            Rotation::RightDown => RotationDto::RightDown,
        }
    }
}

/// Player lifecycle state sent to clients for UI flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatusDto {
    Waiting,
    Paused,
    Resumed,
    Ready,
    Died,
    Idle,
    Respawning,
}

impl From<PlayerStatus> for PlayerStatusDto {
    fn from(s: PlayerStatus) -> Self {
        match s {
            PlayerStatus::Waiting => PlayerStatusDto::Waiting,
            PlayerStatus::Paused => PlayerStatusDto::Paused,
            PlayerStatus::Resumed => PlayerStatusDto::Resumed,
            PlayerStatus::Ready => PlayerStatusDto::Ready,
            PlayerStatus::Died => PlayerStatusDto::Died,
            PlayerStatus::Idle => PlayerStatusDto::Idle,
            PlayerStatus::Respawning => PlayerStatusDto::Respawning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatusDto {
    WaitForPlayer,
    Playing,
    Scoreboard,
}

impl From<GameStatus> for GameStatusDto {
    fn from(s: GameStatus) -> Self {
        match s {
            GameStatus::WaitForPlayer => GameStatusDto::WaitForPlayer,
            GameStatus::Playing => GameStatusDto::Playing,
            GameStatus::Scoreboard => GameStatusDto::Scoreboard,
        }
    }
}
