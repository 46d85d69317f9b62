//! Per-room write locks.
//!
//! The conflict check and the booking write are two separate store calls.
//! Without coordination they form a check-then-act race: two concurrent
//! creates for overlapping slots can both pass the check before either
//! writes, and the room ends up double-booked. The fix is a
//! single-writer-per-room rule: all booking writes for one room are
//! serialized through one lock, so the check and the write become a
//! single critical section.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use huddle_types::RoomId;
use tokio::sync::OwnedMutexGuard;

/// A registry of per-room write locks.
///
/// Cheap to clone (it is an `Arc` around the registry); every clone
/// shares the same locks. The scheduler holds one and acquires the
/// room's lock for the duration of each booking write.
///
/// Lock entries are created on first use and never removed. A deployment
/// has tens of rooms, not millions, so the registry stays small; if
/// rooms ever became ephemeral and numerous, eviction on room deletion
/// would be the follow-up.
#[derive(Default)]
pub struct RoomLocks {
    locks: Arc<Mutex<HashMap<RoomId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl Clone for RoomLocks {
    fn clone(&self) -> Self {
        Self {
            locks: Arc::clone(&self.locks),
        }
    }
}

impl RoomLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the write lock for a room, waiting if another writer
    /// holds it.
    ///
    /// The returned guard owns the lock: hold it across the conflict
    /// check and the store write, drop it afterwards. The registry map
    /// itself is only locked long enough to fetch or create the entry,
    /// never across an await point.
    pub async fn acquire(&self, room_id: RoomId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("room lock registry poisoned");
            Arc::clone(locks.entry(room_id).or_default())
        };
        lock.lock_owned().await
    }
}
