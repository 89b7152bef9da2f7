use super::broadcast::broadcast;
use super::registry::ConnectionRegistry;
use super::throttle::{should_log, throttle_start};
use super::types::GameEvent;
use crate::domain::{Bounds, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, info, warn};

/// Shared configuration for the world task.
#[derive(Debug, Clone)]
pub struct GameSettings {
    /// Fixed tick interval for the game loop.
    pub tick_interval: Duration,
    /// Playable area.
    pub bounds: Bounds,
}

/// The single writer of the world and the connection registry.
///
/// Each tick drains queued events, steps the simulation, snapshots the world once, and fans the
/// snapshot out to every connection. Runs until every event sender is dropped.
pub async fn world_task(mut input_rx: mpsc::Receiver<GameEvent>, settings: GameSettings) {
    let mut tick: u64 = 0;
    let mut world = World::new(settings.bounds);
    let mut registry = ConnectionRegistry::new();
    let mut rng = StdRng::from_os_rng();

    // Drive the fixed-step game loop at the configured tick rate.
    let mut interval = tokio::time::interval(settings.tick_interval);
    let mut last_tick = Instant::now();
    let mut last_lag_log = throttle_start();

    info!(
        tick_ms = settings.tick_interval.as_millis() as u64,
        width = settings.bounds.width,
        height = settings.bounds.height,
        "world task started"
    );

    loop {
        interval.tick().await;

        // Physics is tick-scaled; dt only feeds overrun diagnostics.
        let dt = last_tick.elapsed();
        last_tick = Instant::now();
        if dt > settings.tick_interval * 2 {
            debug!(tick, dt_ms = dt.as_millis() as u64, "tick overran");
        }

        loop {
            match input_rx.try_recv() {
                Ok(ev) => apply_event(&mut world, &mut registry, &mut rng, ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!(tick, "event channel closed; world task exiting");
                    return;
                }
            }
        }

        let report = world.step();
        for hit in &report.hits {
            info!(
                victim_id = hit.victim_id,
                shooter_id = hit.shooter_id,
                bullet_id = hit.bullet_id,
                victim_life = hit.victim_life,
                "player hit"
            );
        }

        tick += 1;
        let snapshot = Arc::new(world.snapshot(tick));
        let stats = broadcast(&registry, &world, snapshot);
        if !stats.lagging.is_empty() && should_log(&mut last_lag_log) {
            warn!(
                tick,
                lagging = ?stats.lagging,
                "outbound queues full; dropping world updates"
            );
        }
    }
}

/// Applies one queued event. Join and leave keep the registry and the world in lockstep.
pub fn apply_event<R: Rng>(
    world: &mut World,
    registry: &mut ConnectionRegistry,
    rng: &mut R,
    ev: GameEvent,
) {
    match ev {
        GameEvent::Join {
            player_id,
            outbound,
        } => {
            registry.add(player_id, outbound);
            let p = world.spawn_player(player_id, rng);
            info!(player_id, x = p.x, y = p.y, "player joined");
        }
        GameEvent::Leave { player_id } => {
            let had_connection = registry.remove(player_id);
            let had_player = world.remove_player(player_id).is_some();
            if had_connection || had_player {
                info!(player_id, players = world.player_count(), "player left");
            }
        }
        GameEvent::Command { player_id, command } => {
            if !world.apply_command(player_id, &command) {
                debug!(player_id, ?command, "command dropped");
            }
        }
    }
}
