//! Booking scheduling: validate, check conflicts, persist.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use huddle_store::{BookingStore, StoreError};
use huddle_types::{Booking, BookingId, NewBooking, RoomId, TimeSlot, UserId};

use crate::{ConflictChecker, CoreError, RoomLocks};

/// Orchestrates creating and updating bookings.
///
/// Each write follows the same three steps:
///
/// 1. Validate the interval. `start >= end` is rejected with
///    [`CoreError::InvalidInterval`] before anything touches storage.
/// 2. Check conflicts under the room's write lock (excluding, on update,
///    the booking's own prior identity).
/// 3. Persist via the store and return the materialized entity.
///
/// Authorization is NOT this component's concern: the access guard gates
/// every call before it reaches the scheduler.
///
/// # Concurrency
///
/// Steps 2 and 3 execute inside the room's critical section (see
/// [`RoomLocks`]), which closes the check-then-act race between two
/// concurrent writes for the same room. Independently of that, a backend
/// that enforces its own (room, interval) exclusion constraint may
/// reject the write after the fact; that [`StoreError::Conflict`] signal
/// is translated into the same [`CoreError::Conflict`] the pre-write
/// check produces, so callers see one conflict error either way.
pub struct BookingScheduler<S> {
    store: Arc<S>,
    checker: ConflictChecker<S>,
    locks: RoomLocks,
}

impl<S> Clone for BookingScheduler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            checker: self.checker.clone(),
            locks: self.locks.clone(),
        }
    }
}

impl<S: BookingStore> BookingScheduler<S> {
    /// Creates a scheduler over the given store, sharing the given lock
    /// registry with any other writers.
    pub fn new(store: Arc<S>, locks: RoomLocks) -> Self {
        let checker = ConflictChecker::new(Arc::clone(&store));
        Self {
            store,
            checker,
            locks,
        }
    }

    /// Creates a booking for `user` in `room` over `[start, end)`.
    pub async fn create(
        &self,
        room_id: RoomId,
        user_id: UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Booking, CoreError> {
        let slot = TimeSlot::new(start, end)?;

        // Critical section: no other writer for this room between the
        // conflict check and the insert.
        let _room_guard = self.locks.acquire(room_id).await;

        if self.checker.has_conflict(room_id, &slot, None).await? {
            tracing::debug!(%room_id, %user_id, %slot, "booking rejected, slot conflict");
            return Err(CoreError::Conflict { room_id, slot });
        }

        let booking = self
            .store
            .insert_booking(NewBooking {
                room_id,
                user_id,
                slot,
                description,
            })
            .await
            .map_err(|err| translate_conflict(err, slot))?;

        tracing::info!(
            booking_id = %booking.id,
            %room_id,
            %user_id,
            %slot,
            "booking created"
        );
        Ok(booking)
    }

    /// Moves and/or re-describes an existing booking.
    ///
    /// The booking's own prior interval is excluded from the conflict
    /// check, so shrinking, extending, or re-confirming a booking over
    /// its own old slot never self-conflicts.
    pub async fn update(
        &self,
        booking_id: BookingId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Booking, CoreError> {
        let slot = TimeSlot::new(start, end)?;

        // The room is looked up from the stored booking, then the write
        // proceeds under that room's lock like a create.
        let existing = self.store.get_booking(booking_id).await?;
        let room_id = existing.room_id;

        let _room_guard = self.locks.acquire(room_id).await;

        if self
            .checker
            .has_conflict(room_id, &slot, Some(booking_id))
            .await?
        {
            tracing::debug!(%booking_id, %room_id, %slot, "update rejected, slot conflict");
            return Err(CoreError::Conflict { room_id, slot });
        }

        let booking = self
            .store
            .update_booking(booking_id, slot, description)
            .await
            .map_err(|err| translate_conflict(err, slot))?;

        tracing::info!(%booking_id, %room_id, %slot, "booking updated");
        Ok(booking)
    }
}

/// Maps a backend's post-write conflict signal onto the same error the
/// pre-write check produces; everything else passes through.
fn translate_conflict(err: StoreError, slot: TimeSlot) -> CoreError {
    match err {
        StoreError::Conflict(room_id) => CoreError::Conflict { room_id, slot },
        other => CoreError::Store(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use huddle_store::MemoryStore;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    async fn scheduler_with_room() -> (BookingScheduler<MemoryStore>, RoomId) {
        let store = Arc::new(MemoryStore::new());
        let room = store
            .create_room_with_owner("Apollo".into(), String::new(), UserId(1))
            .await
            .unwrap();
        (BookingScheduler::new(store, RoomLocks::new()), room.id)
    }

    #[tokio::test]
    async fn test_create_rejects_reversed_interval_before_storage() {
        let (scheduler, room_id) = scheduler_with_room().await;

        let result = scheduler
            .create(room_id, UserId(1), at(11, 0), at(10, 0), None)
            .await;

        assert!(matches!(result, Err(CoreError::InvalidInterval(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let (scheduler, room_id) = scheduler_with_room().await;

        scheduler
            .create(room_id, UserId(1), at(10, 0), at(11, 0), None)
            .await
            .unwrap();
        let result = scheduler
            .create(room_id, UserId(1), at(10, 30), at(11, 30), None)
            .await;

        assert!(matches!(result, Err(CoreError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_accepts_touching_slot() {
        let (scheduler, room_id) = scheduler_with_room().await;

        scheduler
            .create(room_id, UserId(1), at(10, 0), at(11, 0), None)
            .await
            .unwrap();
        // Starts exactly at the previous end: allowed.
        let booking = scheduler
            .create(room_id, UserId(1), at(11, 0), at(12, 0), None)
            .await
            .unwrap();

        assert_eq!(booking.slot.start(), at(11, 0));
    }

    #[tokio::test]
    async fn test_update_own_interval_never_self_conflicts() {
        let (scheduler, room_id) = scheduler_with_room().await;

        let booking = scheduler
            .create(room_id, UserId(1), at(10, 0), at(11, 0), None)
            .await
            .unwrap();
        // Move the booking within its own old interval.
        let updated = scheduler
            .update(booking.id, at(10, 15), at(10, 45), None)
            .await
            .unwrap();

        assert_eq!(updated.slot.start(), at(10, 15));
    }

    #[tokio::test]
    async fn test_update_still_conflicts_with_other_bookings() {
        let (scheduler, room_id) = scheduler_with_room().await;

        let first = scheduler
            .create(room_id, UserId(1), at(10, 0), at(11, 0), None)
            .await
            .unwrap();
        scheduler
            .create(room_id, UserId(1), at(11, 0), at(12, 0), None)
            .await
            .unwrap();

        // Extending the first booking into the second one's slot fails.
        let result = scheduler
            .update(first.id, at(10, 0), at(11, 30), None)
            .await;

        assert!(matches!(result, Err(CoreError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_unknown_booking_is_not_found() {
        let (scheduler, _) = scheduler_with_room().await;

        let result = scheduler
            .update(BookingId(404), at(10, 0), at(11, 0), None)
            .await;

        assert!(matches!(
            result,
            Err(CoreError::Store(StoreError::BookingNotFound(_)))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_overlapping_creates_admit_exactly_one() {
        // The check-then-act race: two writers, same room, overlapping
        // slots, released simultaneously. The per-room lock must let
        // exactly one through; the other sees Conflict.
        let (scheduler, room_id) = scheduler_with_room().await;
        let scheduler = Arc::new(scheduler);
        let barrier = Arc::new(tokio::sync::Barrier::new(2));

        let mut handles = Vec::new();
        for offset in [0u32, 30] {
            let scheduler = Arc::clone(&scheduler);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                scheduler
                    .create(room_id, UserId(1), at(10, offset), at(11, offset), None)
                    .await
            }));
        }

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(CoreError::Conflict { .. }) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(ok, 1, "exactly one create must win");
        assert_eq!(conflicts, 1, "the loser must see Conflict");
    }
}
