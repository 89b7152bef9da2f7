use crate::domain::PlayerId;
use std::{
    sync::{
        OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

/// Returns a process-unique, monotonically increasing connection id.
///
/// Seeded from the wall clock so ids from a restarted process are unlikely to collide with ids a
/// client still remembers from the previous run.
pub fn connection_id() -> PlayerId {
    static NEXT: OnceLock<AtomicU64> = OnceLock::new();
    NEXT.get_or_init(|| AtomicU64::new(clock_seed()))
        .fetch_add(1, Ordering::Relaxed)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(1)
}
