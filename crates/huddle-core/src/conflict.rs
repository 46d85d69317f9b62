//! Conflict detection: does a candidate slot collide with an existing
//! booking?

use std::sync::Arc;

use huddle_store::BookingStore;
use huddle_types::{BookingId, RoomId, TimeSlot};

use crate::CoreError;

/// Decides whether a candidate slot overlaps any existing booking in a
/// room.
///
/// The overlap rule is the half-open interval test on
/// [`TimeSlot::overlaps`]: `[s, e)` conflicts with `[bs, be)` iff
/// `s < be && bs < e`. Back-to-back slots never conflict.
///
/// The checker assumes the candidate is well-formed; `TimeSlot` can't be
/// constructed otherwise. It scans the room's full booking list on every
/// call, which is fine at meeting-room scale. If a room ever carries
/// thousands of bookings, an ordered-by-start structure with a sweep is
/// the upgrade path; correctness does not depend on it.
pub struct ConflictChecker<S> {
    store: Arc<S>,
}

impl<S> Clone for ConflictChecker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: BookingStore> ConflictChecker<S> {
    /// Creates a checker over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `true` if at least one booking in the room overlaps the
    /// candidate slot.
    ///
    /// `exclude` omits one booking from the comparison set. Pass the id
    /// of the booking being edited so that moving a booking within (or
    /// onto) its own old interval never reports a self-conflict.
    pub async fn has_conflict(
        &self,
        room_id: RoomId,
        candidate: &TimeSlot,
        exclude: Option<BookingId>,
    ) -> Result<bool, CoreError> {
        let bookings = self.store.list_bookings(room_id).await?;
        Ok(bookings
            .iter()
            .filter(|booking| Some(booking.id) != exclude)
            .any(|booking| booking.slot.overlaps(candidate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use huddle_store::MemoryStore;
    use huddle_types::{NewBooking, UserId};

    fn slot(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeSlot {
        let at = |h, m| Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap();
        TimeSlot::new(at(h1, m1), at(h2, m2)).unwrap()
    }

    async fn room_with_booking(store: &Arc<MemoryStore>, s: TimeSlot) -> (RoomId, BookingId) {
        let room = store
            .create_room_with_owner("Apollo".into(), String::new(), UserId(1))
            .await
            .unwrap();
        let booking = store
            .insert_booking(NewBooking {
                room_id: room.id,
                user_id: UserId(1),
                slot: s,
                description: None,
            })
            .await
            .unwrap();
        (room.id, booking.id)
    }

    #[tokio::test]
    async fn test_overlapping_candidate_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let checker = ConflictChecker::new(Arc::clone(&store));
        let (room_id, _) = room_with_booking(&store, slot(10, 0, 11, 0)).await;

        let conflict = checker
            .has_conflict(room_id, &slot(10, 30, 11, 30), None)
            .await
            .unwrap();
        assert!(conflict);
    }

    #[tokio::test]
    async fn test_touching_candidate_does_not_conflict() {
        let store = Arc::new(MemoryStore::new());
        let checker = ConflictChecker::new(Arc::clone(&store));
        let (room_id, _) = room_with_booking(&store, slot(10, 0, 11, 0)).await;

        // Starts exactly when the existing booking ends.
        let conflict = checker
            .has_conflict(room_id, &slot(11, 0, 12, 0), None)
            .await
            .unwrap();
        assert!(!conflict);

        // Ends exactly when the existing booking starts.
        let conflict = checker
            .has_conflict(room_id, &slot(9, 0, 10, 0), None)
            .await
            .unwrap();
        assert!(!conflict);
    }

    #[tokio::test]
    async fn test_empty_room_never_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let checker = ConflictChecker::new(Arc::clone(&store));
        let room = store
            .create_room_with_owner("Empty".into(), String::new(), UserId(1))
            .await
            .unwrap();

        let conflict = checker
            .has_conflict(room.id, &slot(10, 0, 11, 0), None)
            .await
            .unwrap();
        assert!(!conflict);
    }

    #[tokio::test]
    async fn test_exclude_skips_own_booking() {
        let store = Arc::new(MemoryStore::new());
        let checker = ConflictChecker::new(Arc::clone(&store));
        let (room_id, booking_id) = room_with_booking(&store, slot(10, 0, 11, 0)).await;

        // The candidate overlaps only the booking being edited: with the
        // exclusion in place that is not a conflict.
        let conflict = checker
            .has_conflict(room_id, &slot(10, 15, 10, 45), Some(booking_id))
            .await
            .unwrap();
        assert!(!conflict);

        // Without the exclusion it is.
        let conflict = checker
            .has_conflict(room_id, &slot(10, 15, 10, 45), None)
            .await
            .unwrap();
        assert!(conflict);
    }

    #[tokio::test]
    async fn test_conflicts_are_scoped_to_the_room() {
        let store = Arc::new(MemoryStore::new());
        let checker = ConflictChecker::new(Arc::clone(&store));
        let (_, _) = room_with_booking(&store, slot(10, 0, 11, 0)).await;
        let other = store
            .create_room_with_owner("Artemis".into(), String::new(), UserId(1))
            .await
            .unwrap();

        // Same instant, different room: no conflict.
        let conflict = checker
            .has_conflict(other.id, &slot(10, 0, 11, 0), None)
            .await
            .unwrap();
        assert!(!conflict);
    }
}
