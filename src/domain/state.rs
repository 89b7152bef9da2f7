// Domain-level simulation entities and snapshot types.

use super::rotation::Rotation;
use super::tuning::player::PlayerTuning;

/// Connection-scoped identity; a player shares the id of the connection that owns it.
pub type PlayerId = u64;
pub type BulletId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Waiting,
    Paused,
    Resumed,
    Ready,
    Died,
    Idle,
    Respawning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    WaitForPlayer,
    Playing,
    Scoreboard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Inclusive on every edge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Held inputs, staged by commands and consumed by the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub intent: Intent,

    // Movement constants, per player.
    pub acceleration: f64,
    pub velocity: f64,
    pub rotation: Rotation,

    // Combat state.
    pub life: f64,
    pub power: f64,
    pub reload: f64, // ticks until the next shot
    pub score: u32,

    pub status: PlayerStatus,
}

impl Player {
    pub fn new(id: PlayerId, x: f64, y: f64, tuning: &PlayerTuning) -> Self {
        Self {
            id,
            name: None,
            x,
            y,
            intent: Intent::default(),
            acceleration: tuning.acceleration,
            velocity: tuning.velocity,
            rotation: Rotation::default(),
            life: tuning.max_life,
            power: tuning.power,
            reload: tuning.spawn_reload_ticks,
            score: 0,
            status: PlayerStatus::Waiting,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Distance covered along one axis in a single tick.
    pub fn step(&self) -> f64 {
        self.acceleration * self.velocity
    }
}

#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: BulletId,
    pub owner_id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    pub speed: f64,
    pub damage: f64,
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub intent: Intent,
    pub acceleration: f64,
    pub velocity: f64,
    pub rotation: Rotation,
    pub life: f64,
    pub power: f64,
    pub reload: f64,
    pub status: PlayerStatus,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulletSnapshot {
    pub id: BulletId,
    pub owner_id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
    pub speed: f64,
    pub damage: f64,
}

/// Immutable copy of the world taken once per tick and shared by every recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub players: Vec<PlayerSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
    pub status: GameStatus,
    pub bounds: Bounds,
}

impl From<&Player> for PlayerSnapshot {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            x: p.x,
            y: p.y,
            intent: p.intent,
            acceleration: p.acceleration,
            velocity: p.velocity,
            rotation: p.rotation,
            life: p.life,
            power: p.power,
            reload: p.reload,
            status: p.status,
            score: p.score,
        }
    }
}

impl From<&Bullet> for BulletSnapshot {
    fn from(b: &Bullet) -> Self {
        Self {
            id: b.id,
            owner_id: b.owner_id,
            x: b.x,
            y: b.y,
            rotation: b.rotation,
            speed: b.speed,
            damage: b.damage,
        }
    }
}
