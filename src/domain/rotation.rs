// Eight-way facing shared by players and the bullets they fire.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    Up,
    Down,
    // Spawn facing.
    #[default]
    Left,
    Right,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl Rotation {
    pub const ALL: [Rotation; 8] = [
        Rotation::Up,
        Rotation::Down,
        Rotation::Left,
        Rotation::Right,
        Rotation::LeftUp,
        Rotation::LeftDown,
        Rotation::RightUp,
        Rotation::RightDown,
    ];

    /// Per-axis travel direction. `+y` is up; diagonals are not normalized.
    pub fn direction(self) -> (f64, f64) {
        match self {
            Rotation::Up => (0.0, 1.0),
            Rotation::Down => (0.0, -1.0),
            Rotation::Left => (-1.0, 0.0),
            Rotation::Right => (1.0, 0.0),
            Rotation::LeftUp => (-1.0, 1.0),
            Rotation::LeftDown => (-1.0, -1.0),
            Rotation::RightUp => (1.0, 1.0),
            Rotation::RightDown => (1.0, -1.0),
        }
    }
}
