/// Gameplay tuning for projectiles.

#[derive(Debug, Clone, Copy)]
pub struct ProjectileTuning {
    /// Distance travelled per tick along each axis of the bullet's rotation.
    pub speed: f64,

    /// Horizontal hit tolerance (absolute distance) between bullet and player.
    pub hit_half_width: f64,

    /// Vertical hit tolerance; twice the horizontal one.
    pub hit_half_height: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 2.0,
            hit_half_width: 5.0,
            hit_half_height: 10.0,
        }
    }
}
