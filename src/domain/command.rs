// Text command vocabulary sent by clients, decoded into intent changes.

use super::state::{Intent, Player, PlayerStatus};

pub const MAX_DISPLAY_NAME_LEN: usize = 32;
const SETUP_PREFIX: &str = "setup|";

/// A held direction. Diagonals touch both component flags at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Up,
    Down,
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    Steer { steer: Steer, pressed: bool },
    Fire { pressed: bool },
    /// One-shot fire outside the press/release model.
    Shoot,
    Setup { name: String },
}

impl Command {
    /// Decodes a single text token. Unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Command> {
        if let Some(name) = token.strip_prefix(SETUP_PREFIX) {
            return Some(Command::Setup {
                name: sanitize_name(name),
            });
        }

        let command = match token {
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "shoot" => Command::Shoot,
            "Firepressed" => Command::Fire { pressed: true },
            "Firerelease" => Command::Fire { pressed: false },
            _ => {
                let (steer, pressed) = parse_steer(token)?;
                Command::Steer { steer, pressed }
            }
        };
        Some(command)
    }

    /// Intent commands are dropped for dead players; status and naming still apply.
    pub fn is_intent(&self) -> bool {
        matches!(
            self,
            Command::Steer { .. } | Command::Fire { .. } | Command::Shoot
        )
    }

    /// Applies everything except `Shoot`, which needs the world to spawn a bullet.
    pub fn apply(&self, player: &mut Player) {
        match self {
            // Death is final; status tokens must not hide it from clients.
            Command::Pause | Command::Resume if player.status == PlayerStatus::Died => {}
            Command::Pause => player.status = PlayerStatus::Paused,
            Command::Resume => player.status = PlayerStatus::Resumed,
            Command::Steer { steer, pressed } => steer.apply(&mut player.intent, *pressed),
            Command::Fire { pressed } => player.intent.fire = *pressed,
            Command::Setup { name } => player.name = Some(name.clone()),
            Command::Shoot => {}
        }
    }
}

impl Steer {
    fn apply(self, intent: &mut Intent, pressed: bool) {
        let (left, right, up, down) = match self {
            Steer::Left => (true, false, false, false),
            Steer::Right => (false, true, false, false),
            Steer::Up => (false, false, true, false),
            Steer::Down => (false, false, false, true),
            Steer::LeftUp => (true, false, true, false),
            Steer::LeftDown => (true, false, false, true),
            Steer::RightUp => (false, true, true, false),
            Steer::RightDown => (false, true, false, true),
        };
        if left {
            intent.left = pressed;
        }
        if right {
            intent.right = pressed;
        }
        if up {
            intent.up = pressed;
        }
        if down {
            intent.down = pressed;
        }
    }
}

fn parse_steer(token: &str) -> Option<(Steer, bool)> {
    let (dir, pressed) = if let Some(dir) = token.strip_suffix("pressed") {
        (dir, true)
    } else if let Some(dir) = token.strip_suffix("release") {
        (dir, false)
    } else {
        return None;
    };

    let steer = match dir {
        "Left" => Steer::Left,
        "Right" => Steer::Right,
        "Up" => Steer::Up,
        "Down" => Steer::Down,
        "LeftUp" => Steer::LeftUp,
        "LeftDown" => Steer::LeftDown,
        "RightUp" => Steer::RightUp,
        "RightDown" => Steer::RightDown,
        _ => return None,
    };
    Some((steer, pressed))
}

fn sanitize_name(raw: &str) -> String {
    raw.trim().chars().take(MAX_DISPLAY_NAME_LEN).collect()
}
