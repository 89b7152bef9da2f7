// The authoritative world: players keyed by connection id, live bullets, and bounds.

use super::command::Command;
use super::state::{
    Bounds, Bullet, BulletId, BulletSnapshot, GameStatus, Player, PlayerId, PlayerSnapshot,
    WorldSnapshot,
};
use super::systems::movement;
use super::systems::projectiles::{self, Hit, ProjectileConfig};
use super::tuning::player::PlayerTuning;
use super::tuning::projectile::ProjectileTuning;
use rand::Rng;
use std::collections::HashMap;

/// Outcome of a single simulation step.
#[derive(Debug, Default)]
pub struct TickReport {
    pub fired: Vec<BulletId>,
    pub hits: Vec<Hit>,
    pub purged: usize,
}

pub struct World {
    players: HashMap<PlayerId, Player>,
    // Join order; the map stays the source of truth.
    order: Vec<PlayerId>,
    bullets: Vec<Bullet>,
    next_bullet_id: BulletId,
    status: GameStatus,
    bounds: Bounds,
    player_tuning: PlayerTuning,
    projectile_tuning: ProjectileTuning,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self::with_tuning(bounds, PlayerTuning::default(), ProjectileTuning::default())
    }

    pub fn with_tuning(
        bounds: Bounds,
        player_tuning: PlayerTuning,
        projectile_tuning: ProjectileTuning,
    ) -> Self {
        Self {
            players: HashMap::new(),
            order: Vec::new(),
            bullets: Vec::new(),
            next_bullet_id: 1,
            status: GameStatus::WaitForPlayer,
            bounds,
            player_tuning,
            projectile_tuning,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player_count(&self) -> usize {
        self.order.len()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// Players in join order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.order.iter().filter_map(|id| self.players.get(id))
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Creates a player for a freshly opened connection at a random spot inside the bounds.
    pub fn spawn_player<R: Rng>(&mut self, id: PlayerId, rng: &mut R) -> &Player {
        let x = rng.random_range(0.0..=self.bounds.width);
        let y = rng.random_range(0.0..=self.bounds.height);
        let player = Player::new(id, x, y, &self.player_tuning);
        self.insert_player(player)
    }

    /// Inserts (or replaces) a player, keeping its existing join position on replace.
    pub fn insert_player(&mut self, player: Player) -> &Player {
        let id = player.id;
        if self.players.insert(id, player).is_none() {
            self.order.push(id);
        }
        self.refresh_status();
        &self.players[&id]
    }

    /// Removes the player and every bullet it still has in flight. Absent ids are a no-op.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let removed = self.players.remove(&id)?;
        self.order.retain(|p| *p != id);
        self.bullets.retain(|b| b.owner_id != id);
        self.refresh_status();
        Some(removed)
    }

    /// Applies a decoded client command to the player. Returns false when the player is unknown
    /// or the command was dropped.
    pub fn apply_command(&mut self, id: PlayerId, command: &Command) -> bool {
        let cfg = self.projectile_config();
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        if command.is_intent() && !player.is_alive() {
            return false;
        }

        match command {
            Command::Shoot => {
                projectiles::fire(player, &mut self.bullets, &mut self.next_bullet_id, cfg);
            }
            other => other.apply(player),
        }
        true
    }

    /// Runs one simulation step: movement and firing, bullet advance, collisions, cleanup.
    pub fn step(&mut self) -> TickReport {
        let cfg = self.projectile_config();
        let mut report = TickReport::default();

        for id in &self.order {
            let Some(p) = self.players.get_mut(id) else {
                continue;
            };
            if !p.is_alive() {
                continue;
            }
            movement::tick_player(p, self.bounds);
            if p.intent.fire {
                if let Some(bullet_id) =
                    projectiles::fire(p, &mut self.bullets, &mut self.next_bullet_id, cfg)
                {
                    report.fired.push(bullet_id);
                }
            }
        }

        projectiles::advance_projectiles(&mut self.bullets);
        report.hits =
            projectiles::resolve_collisions(&mut self.players, &self.order, &mut self.bullets, cfg);
        report.purged = projectiles::purge_projectiles(&mut self.bullets, self.bounds);
        report
    }

    pub fn snapshot(&self, tick: u64) -> WorldSnapshot {
        WorldSnapshot {
            tick,
            players: self.players().map(PlayerSnapshot::from).collect(),
            bullets: self.bullets.iter().map(BulletSnapshot::from).collect(),
            status: self.status,
            bounds: self.bounds,
        }
    }

    fn projectile_config(&self) -> ProjectileConfig {
        ProjectileConfig {
            speed: self.projectile_tuning.speed,
            hit_half_width: self.projectile_tuning.hit_half_width,
            hit_half_height: self.projectile_tuning.hit_half_height,
            reload_ticks: self.player_tuning.reload_ticks,
        }
    }

    fn refresh_status(&mut self) {
        self.status = if self.order.is_empty() {
            GameStatus::WaitForPlayer
        } else {
            GameStatus::Playing
        };
    }
}
