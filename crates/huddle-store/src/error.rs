//! Error types for the storage layer.

use huddle_types::{BookingId, RoomId, UserId};

/// Errors a storage backend can report.
///
/// Absence (`*NotFound`), duplication (`MembershipExists`), and backend
/// failure (`Unavailable`) are all distinct variants so callers can react
/// to each one in a typed way. Nothing here is ever collapsed into a bare
/// `false` or an empty result.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced room does not exist.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// The referenced booking does not exist.
    #[error("booking {0} not found")]
    BookingNotFound(BookingId),

    /// The referenced user does not exist.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// No membership row exists for this (room, user) pair.
    #[error("no membership for user {user_id} in room {room_id}")]
    MembershipNotFound { room_id: RoomId, user_id: UserId },

    /// A membership row already exists for this (room, user) pair.
    /// Memberships are unique per (room, user); a duplicate insert is
    /// rejected, never silently merged.
    #[error("user {user_id} already has a membership in room {room_id}")]
    MembershipExists { room_id: RoomId, user_id: UserId },

    /// The backend refused a booking write because of its own exclusion
    /// constraint on (room, interval).
    ///
    /// [`MemoryStore`](crate::MemoryStore) never produces this (conflict
    /// checking happens in the core, under the room's write lock), but a
    /// database backend with a range-exclusion constraint reports its
    /// post-write conflicts through this variant and the scheduler
    /// translates it into the same conflict error as a pre-write check.
    #[error("booking overlaps an existing booking in room {0}")]
    Conflict(RoomId),

    /// The backend failed or timed out. Retryable by the caller; the
    /// core itself never retries.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
