// Per-tick fan-out of the shared snapshot to every registered connection.

use super::registry::{ConnectionRegistry, DeliveryError};
use super::types::WorldView;
use crate::domain::{PlayerId, PlayerStatus, World, WorldSnapshot};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BroadcastStats {
    pub delivered: usize,
    /// Connections without a player, or whose player is paused.
    pub skipped: usize,
    /// Connections whose queue was full this tick.
    pub lagging: Vec<PlayerId>,
    pub closed: usize,
}

/// Queues one view per connection. Every recipient shares the same snapshot; only `you` differs.
pub fn broadcast(
    registry: &ConnectionRegistry,
    world: &World,
    snapshot: Arc<WorldSnapshot>,
) -> BroadcastStats {
    let mut stats = BroadcastStats::default();

    registry.for_each(|conn| {
        let Some(player) = world.player(conn.id) else {
            stats.skipped += 1;
            return;
        };
        if player.status == PlayerStatus::Paused {
            stats.skipped += 1;
            return;
        }

        let view = WorldView {
            snapshot: Arc::clone(&snapshot),
            you: conn.id,
        };
        match conn.try_deliver(view) {
            Ok(()) => stats.delivered += 1,
            Err(DeliveryError::Full) => stats.lagging.push(conn.id),
            Err(DeliveryError::Closed) => {
                debug!(player_id = conn.id, "outbound queue closed; awaiting leave");
                stats.closed += 1;
            }
        }
    });

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bounds, Command, Player};
    use crate::domain::tuning::player::PlayerTuning;
    use tokio::sync::mpsc;

    fn world_with(ids: &[PlayerId]) -> World {
        let mut world = World::new(Bounds::default());
        for id in ids {
            world.insert_player(Player::new(*id, 1.0, 1.0, &PlayerTuning::default()));
        }
        world
    }

    #[test]
    fn each_recipient_sees_itself_as_you() {
        let world = world_with(&[1, 2]);
        let mut registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        registry.add(1, tx1);
        registry.add(2, tx2);
        let snapshot = Arc::new(world.snapshot(3));

        let stats = broadcast(&registry, &world, Arc::clone(&snapshot));

        assert_eq!(stats.delivered, 2);
        let v1 = rx1.try_recv().expect("view for 1");
        let v2 = rx2.try_recv().expect("view for 2");
        assert_eq!(v1.you, 1);
        assert_eq!(v2.you, 2);
        assert!(Arc::ptr_eq(&v1.snapshot, &v2.snapshot));
        assert_eq!(*v1.snapshot, *snapshot);
    }

    #[test]
    fn paused_and_playerless_connections_are_skipped() {
        let mut world = world_with(&[1, 2]);
        world.apply_command(2, &Command::Pause);
        let mut registry = ConnectionRegistry::new();
        let (tx1, mut rx1) = mpsc::channel(4);
        let (tx2, mut rx2) = mpsc::channel(4);
        let (tx3, mut rx3) = mpsc::channel(4);
        registry.add(1, tx1);
        registry.add(2, tx2);
        registry.add(3, tx3);

        let stats = broadcast(&registry, &world, Arc::new(world.snapshot(1)));

        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.skipped, 2);
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_err());
        assert!(rx3.try_recv().is_err());
    }

    #[test]
    fn slow_or_closed_connections_do_not_block_others() {
        let world = world_with(&[1, 2, 3]);
        let mut registry = ConnectionRegistry::new();
        let (tx1, _rx1) = mpsc::channel(1);
        let (tx2, rx2) = mpsc::channel(1);
        let (tx3, mut rx3) = mpsc::channel(1);
        registry.add(1, tx1);
        registry.add(2, tx2);
        registry.add(3, tx3);
        drop(rx2);

        let first = broadcast(&registry, &world, Arc::new(world.snapshot(1)));
        assert_eq!(first.delivered, 2);
        assert_eq!(first.closed, 1);

        // Connection 3 drains, connection 1 does not.
        rx3.try_recv().expect("first view");
        let second = broadcast(&registry, &world, Arc::new(world.snapshot(2)));
        assert_eq!(second.delivered, 1);
        assert_eq!(second.lagging, vec![1]);
        assert_eq!(rx3.try_recv().expect("second view").snapshot.tick, 2);
    }
}
