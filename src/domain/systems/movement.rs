use crate::domain::rotation::Rotation;
use crate::domain::state::{Bounds, Player};

/// Advances one living player by a single tick.
///
/// Each axis is stepped independently by `acceleration * velocity`, so diagonal motion covers
/// the full step on both axes. A step is skipped when the player already sits on or past the
/// bound it would move towards. Dead players are left untouched.
pub fn tick_player(p: &mut Player, bounds: Bounds) {
    if !p.is_alive() {
        return;
    }
    if p.reload > 0.0 {
        p.reload -= 1.0;
    }

    let step = p.step();
    let intent = p.intent;

    if intent.right && p.x < bounds.width {
        p.x += step;
        if !intent.up && !intent.down {
            p.rotation = Rotation::Right;
        }
    }
    if intent.right && intent.up {
        p.rotation = Rotation::RightUp;
    }
    if intent.right && intent.down {
        p.rotation = Rotation::RightDown;
    }

    if intent.left && p.x > 0.0 {
        p.x -= step;
        if !intent.up && !intent.down {
            p.rotation = Rotation::Left;
        }
    }
    if intent.left && intent.up {
        p.rotation = Rotation::LeftUp;
    }
    if intent.left && intent.down {
        p.rotation = Rotation::LeftDown;
    }

    if intent.up && p.y < bounds.height {
        p.y += step;
        if !intent.left && !intent.right {
            p.rotation = Rotation::Up;
        }
    }
    if intent.down && p.y > 0.0 {
        p.y -= step;
        if !intent.left && !intent.right {
            p.rotation = Rotation::Down;
        }
    }
}
