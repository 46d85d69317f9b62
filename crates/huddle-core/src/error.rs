//! Error types for the booking core.

use huddle_store::StoreError;
use huddle_types::{InvalidInterval, RoomId, TimeSlot, UserId};

use crate::Action;

/// Errors produced by the core's validation, conflict, and authorization
/// logic.
///
/// Every rejected operation yields exactly one of these variants. There
/// is no "silently did nothing" path: a denial is [`Forbidden`] or
/// [`AlreadyMember`](Self::AlreadyMember), a bad interval is
/// [`InvalidInterval`](Self::InvalidInterval), and a storage failure
/// passes through unchanged inside [`Store`](Self::Store).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested interval has `start >= end`. Detected before any
    /// storage interaction.
    #[error(transparent)]
    InvalidInterval(#[from] InvalidInterval),

    /// The requested slot overlaps an existing booking in the room.
    #[error("slot {slot} conflicts with an existing booking in room {room_id}")]
    Conflict { room_id: RoomId, slot: TimeSlot },

    /// The acting user's role does not permit the action in this room.
    /// The guarded operation was not executed.
    #[error("user {user_id} may not {action} in room {room_id}")]
    Forbidden {
        room_id: RoomId,
        user_id: UserId,
        action: Action,
    },

    /// A join request from a user who already holds a membership.
    /// Joining is idempotent at the row level: the existing row is left
    /// untouched and no duplicate is created.
    #[error("user {user_id} is already a member of room {room_id}")]
    AlreadyMember { room_id: RoomId, user_id: UserId },

    /// An attempt to store `Role::None` in a membership row. `None`
    /// means "no row"; rows carry `Member` or `Admin` only.
    #[error("a stored role must be member or admin, not none")]
    InvalidRole,

    /// A storage error, propagated unchanged. Retry policy, if any,
    /// belongs to the caller or the storage collaborator, not the core.
    #[error(transparent)]
    Store(#[from] StoreError),
}
