pub mod player;
pub mod projectile;
