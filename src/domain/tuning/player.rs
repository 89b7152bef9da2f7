/// Gameplay tuning for player avatars.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).
/// All timers are counted in ticks, not seconds.

#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Per-tick movement multiplier.
    pub acceleration: f64,

    /// Base velocity; a player moves `acceleration * velocity` per axis per tick.
    pub velocity: f64,

    /// Life on spawn. A player at or below zero is dead and frozen.
    pub max_life: f64,

    /// Damage carried by each fired bullet.
    pub power: f64,

    /// Ticks before the first shot is allowed after spawning.
    pub spawn_reload_ticks: f64,

    /// Ticks between shots.
    pub reload_ticks: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            acceleration: 1.5,
            velocity: 1.0,
            max_life: 10.0,
            power: 1.0,
            spawn_reload_ticks: 50.0,
            reload_ticks: 25.0,
        }
    }
}
