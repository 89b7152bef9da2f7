pub mod movement;
pub mod projectiles;
