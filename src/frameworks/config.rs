use crate::domain::Bounds;
use std::{env, net::IpAddr, str::FromStr, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub const CONNECT_PATH: &str = "/connect";

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;
// Roughly two thirds of a second of world updates at the default tick rate.
pub const OUTBOUND_CHANNEL_CAPACITY: usize = 32;

const DEFAULT_TICK_MS: u64 = 20;

pub fn bind_host() -> IpAddr {
    env_or("GAME_SERVER_HOST", IpAddr::from([0, 0, 0, 0]))
}

pub fn http_port() -> u16 {
    env_or("GAME_SERVER_PORT", 8888)
}

pub fn tick_interval() -> Duration {
    let millis = env_or("TICK_INTERVAL_MS", DEFAULT_TICK_MS);
    Duration::from_millis(if millis == 0 { DEFAULT_TICK_MS } else { millis })
}

pub fn world_bounds() -> Bounds {
    let defaults = Bounds::default();
    Bounds {
        width: extent_or(env::var("WORLD_WIDTH").ok().as_deref(), defaults.width),
        height: extent_or(env::var("WORLD_HEIGHT").ok().as_deref(), defaults.height),
    }
}

// Spawning samples 0..=extent, so only finite positive extents are usable.
fn extent_or(value: Option<&str>, default: f64) -> f64 {
    let extent = parse_or(value, default);
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        default
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(env::var(key).ok().as_deref(), default)
}

fn parse_or<T: FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
