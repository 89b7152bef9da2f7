use crate::domain::state::{Bounds, Bullet, BulletId, Player, PlayerId, PlayerStatus};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ProjectileConfig {
    pub speed: f64,
    pub hit_half_width: f64,
    pub hit_half_height: f64,
    pub reload_ticks: f64,
}

/// A bullet that connected with a player during the collision pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub bullet_id: BulletId,
    pub shooter_id: PlayerId,
    pub victim_id: PlayerId,
    pub victim_life: f64,
}

/// Spawns a bullet from the player's position and facing when the reload has run out.
///
/// Returns the new bullet id, or `None` when the player is dead or still reloading.
pub fn fire(
    p: &mut Player,
    bullets: &mut Vec<Bullet>,
    next_bullet_id: &mut BulletId,
    cfg: ProjectileConfig,
) -> Option<BulletId> {
    if !p.is_alive() || p.reload > 0.0 {
        return None;
    }

    let id = *next_bullet_id;
    *next_bullet_id = next_bullet_id.wrapping_add(1);
    bullets.push(Bullet {
        id,
        owner_id: p.id,
        x: p.x,
        y: p.y,
        rotation: p.rotation,
        speed: cfg.speed,
        damage: p.power,
        exhausted: false,
    });
    p.reload = cfg.reload_ticks;
    Some(id)
}

/// Moves every bullet along its fixed rotation.
pub fn advance_projectiles(bullets: &mut [Bullet]) {
    for b in bullets.iter_mut() {
        let (dx, dy) = b.rotation.direction();
        b.x += dx * b.speed;
        b.y += dy * b.speed;
    }
}

/// Bullet vs player hit scan over an axis-aligned tolerance box.
///
/// Players are visited in `order`. A bullet that hits is exhausted immediately, so it can score
/// at most once even if it overlaps several players in the same scan. A player that dies during
/// the scan stops absorbing bullets.
pub fn resolve_collisions(
    players: &mut HashMap<PlayerId, Player>,
    order: &[PlayerId],
    bullets: &mut [Bullet],
    cfg: ProjectileConfig,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    for id in order {
        let Some(p) = players.get_mut(id) else {
            continue;
        };

        for b in bullets.iter_mut() {
            if !p.is_alive() {
                break;
            }
            if b.exhausted || b.owner_id == p.id {
                continue;
            }
            if (b.x - p.x).abs() > cfg.hit_half_width || (b.y - p.y).abs() > cfg.hit_half_height {
                continue;
            }

            p.life -= 1.0;
            b.exhausted = true;
            if !p.is_alive() {
                p.status = PlayerStatus::Died;
            }
            hits.push(Hit {
                bullet_id: b.id,
                shooter_id: b.owner_id,
                victim_id: p.id,
                victim_life: p.life,
            });
        }
    }

    // Scores are credited after the scan; the shooter may already be gone.
    for hit in &hits {
        if let Some(shooter) = players.get_mut(&hit.shooter_id) {
            shooter.score += 1;
        }
    }

    hits
}

/// Drops exhausted bullets and any bullet outside the bounds. Returns how many were removed.
pub fn purge_projectiles(bullets: &mut Vec<Bullet>, bounds: Bounds) -> usize {
    let before = bullets.len();
    bullets.retain(|b| !b.exhausted && bounds.contains(b.x, b.y));
    let removed = before - bullets.len();
    if removed > 0 {
        debug!(removed, remaining = bullets.len(), "purged bullets");
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rotation::Rotation;
    use crate::domain::tuning::player::PlayerTuning;
    use crate::domain::tuning::projectile::ProjectileTuning;

    fn cfg() -> ProjectileConfig {
        let t = ProjectileTuning::default();
        ProjectileConfig {
            speed: t.speed,
            hit_half_width: t.hit_half_width,
            hit_half_height: t.hit_half_height,
            reload_ticks: PlayerTuning::default().reload_ticks,
        }
    }

    fn player(id: PlayerId, x: f64, y: f64) -> Player {
        Player::new(id, x, y, &PlayerTuning::default())
    }

    fn bullet(id: BulletId, owner_id: PlayerId, x: f64, y: f64) -> Bullet {
        Bullet {
            id,
            owner_id,
            x,
            y,
            rotation: Rotation::Up,
            speed: 2.0,
            damage: 1.0,
            exhausted: false,
        }
    }

    fn world_of(list: Vec<Player>) -> (HashMap<PlayerId, Player>, Vec<PlayerId>) {
        let order = list.iter().map(|p| p.id).collect();
        let map = list.into_iter().map(|p| (p.id, p)).collect();
        (map, order)
    }

    #[test]
    fn fire_spawns_one_bullet_at_player_and_resets_reload() {
        let mut p = player(7, 40.0, 60.0);
        p.reload = 0.0;
        p.rotation = Rotation::RightDown;
        p.power = 3.0;
        let mut bullets = Vec::new();
        let mut next_id = 1;

        let id = fire(&mut p, &mut bullets, &mut next_id, cfg());

        assert_eq!(id, Some(1));
        assert_eq!(next_id, 2);
        assert_eq!(bullets.len(), 1);
        let b = &bullets[0];
        assert_eq!((b.x, b.y), (40.0, 60.0));
        assert_eq!(b.owner_id, 7);
        assert_eq!(b.rotation, Rotation::RightDown);
        assert_eq!(b.damage, 3.0);
        assert_eq!(p.reload, 25.0);
    }

    #[test]
    fn fire_while_reloading_spawns_nothing() {
        let mut p = player(7, 40.0, 60.0);
        p.reload = 1.0;
        let mut bullets = Vec::new();
        let mut next_id = 1;

        assert_eq!(fire(&mut p, &mut bullets, &mut next_id, cfg()), None);
        assert!(bullets.is_empty());
        assert_eq!(p.reload, 1.0);
    }

    #[test]
    fn advance_follows_rotation_table() {
        let mut bullets: Vec<Bullet> = Rotation::ALL
            .iter()
            .enumerate()
            .map(|(i, r)| Bullet {
                rotation: *r,
                ..bullet(i as BulletId, 1, 100.0, 100.0)
            })
            .collect();

        advance_projectiles(&mut bullets);

        for b in &bullets {
            let (dx, dy) = b.rotation.direction();
            assert_eq!(b.x, 100.0 + dx * 2.0);
            assert_eq!(b.y, 100.0 + dy * 2.0);
        }
    }

    #[test]
    fn hit_inside_tolerance_box_damages_exhausts_and_scores() {
        let (mut players, order) = world_of(vec![player(1, 0.0, 0.0), player(2, 50.0, 50.0)]);
        let mut bullets = vec![bullet(9, 1, 52.0, 53.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].victim_id, 2);
        assert_eq!(players[&2].life, 9.0);
        assert_eq!(players[&1].score, 1);
        assert!(bullets[0].exhausted);
    }

    #[test]
    fn tolerance_box_is_asymmetric() {
        let (mut players, order) = world_of(vec![player(1, 0.0, 0.0), player(2, 50.0, 50.0)]);
        // 9 off vertically is a hit; 6 off horizontally is not.
        let mut bullets = vec![bullet(1, 1, 50.0, 59.0), bullet(2, 1, 56.0, 50.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].bullet_id, 1);
        assert!(!bullets[1].exhausted);
    }

    #[test]
    fn owner_is_never_hit_by_own_bullet() {
        let (mut players, order) = world_of(vec![player(1, 50.0, 50.0)]);
        let mut bullets = vec![bullet(1, 1, 50.0, 50.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert!(hits.is_empty());
        assert_eq!(players[&1].life, 10.0);
        assert!(!bullets[0].exhausted);
    }

    #[test]
    fn bullet_overlapping_two_players_scores_once() {
        let (mut players, order) = world_of(vec![
            player(1, 0.0, 0.0),
            player(2, 50.0, 50.0),
            player(3, 51.0, 51.0),
        ]);
        let mut bullets = vec![bullet(1, 1, 50.0, 50.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert_eq!(hits.len(), 1);
        // First player in join order takes it.
        assert_eq!(players[&2].life, 9.0);
        assert_eq!(players[&3].life, 10.0);
        assert_eq!(players[&1].score, 1);
    }

    #[test]
    fn lethal_hit_marks_player_died_and_stops_absorbing() {
        let mut victim = player(2, 50.0, 50.0);
        victim.life = 1.0;
        let (mut players, order) = world_of(vec![player(1, 0.0, 0.0), victim]);
        let mut bullets = vec![bullet(1, 1, 50.0, 50.0), bullet(2, 1, 50.0, 50.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert_eq!(hits.len(), 1);
        assert_eq!(players[&2].status, PlayerStatus::Died);
        assert!(!bullets[1].exhausted);
    }

    #[test]
    fn hit_from_departed_shooter_still_damages() {
        let (mut players, order) = world_of(vec![player(2, 50.0, 50.0)]);
        let mut bullets = vec![bullet(1, 99, 50.0, 50.0)];

        let hits = resolve_collisions(&mut players, &order, &mut bullets, cfg());

        assert_eq!(hits.len(), 1);
        assert_eq!(players[&2].life, 9.0);
    }

    #[test]
    fn purge_removes_exhausted_and_out_of_bounds() {
        let bounds = Bounds::default();
        let mut exhausted = bullet(1, 1, 10.0, 10.0);
        exhausted.exhausted = true;
        let mut bullets = vec![
            exhausted,
            bullet(2, 1, -0.5, 10.0),
            bullet(3, 1, 10.0, bounds.height + 1.0),
            bullet(4, 1, bounds.width, bounds.height),
            bullet(5, 1, 0.0, 0.0),
        ];

        let removed = purge_projectiles(&mut bullets, bounds);

        assert_eq!(removed, 3);
        let ids: Vec<BulletId> = bullets.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
