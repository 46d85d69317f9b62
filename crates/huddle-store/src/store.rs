//! The `BookingStore` trait: the storage contract the core consumes.
//!
//! Huddle doesn't implement persistence itself. Instead it defines this
//! trait and lets the deployment choose a backend: [`MemoryStore`] for
//! tests and demos, a database-backed implementation in production.
//!
//! # Why a trait?
//!
//! The core's correctness arguments (conflict detection, authorization)
//! only depend on what these methods promise, not on how they are
//! implemented. Keeping the seam narrow also keeps the core testable:
//! every test in the workspace runs against [`MemoryStore`] with no
//! external services.
//!
//! [`MemoryStore`]: crate::MemoryStore

use huddle_types::{Booking, BookingId, NewBooking, Role, Room, RoomId, RoomMembership, TimeSlot, User, UserId};

use crate::StoreError;

/// The narrow query interface over rooms, bookings, memberships, users.
///
/// # Trait bounds
///
/// - `Send + Sync` so a store can be shared across async tasks.
/// - `'static` because the store lives as long as the service.
///
/// # Contract notes
///
/// - `list_bookings` returns bookings ordered by slot start time.
/// - `insert_membership` must reject a duplicate (room, user) pair with
///   [`StoreError::MembershipExists`]; memberships are unique.
/// - `create_room_with_owner` is atomic: the room and the owner's admin
///   membership both exist afterwards, or neither does.
/// - `delete_room` cascades: the room's bookings and memberships are
///   removed with it.
/// - A backend timeout surfaces as [`StoreError::Unavailable`], never as
///   an empty result or a false negative.
pub trait BookingStore: Send + Sync + 'static {
    // -- Bookings ---------------------------------------------------------

    /// Lists a room's bookings, ordered by start time.
    async fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>, StoreError>;

    /// Lists every booking owned by a user, across rooms, ordered by
    /// start time.
    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, StoreError>;

    /// Fetches one booking by id.
    async fn get_booking(&self, id: BookingId) -> Result<Booking, StoreError>;

    /// Persists a new booking and returns the materialized entity with
    /// its assigned id.
    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    /// Rewrites a booking's slot and description.
    async fn update_booking(
        &self,
        id: BookingId,
        slot: TimeSlot,
        description: Option<String>,
    ) -> Result<Booking, StoreError>;

    /// Deletes a booking.
    async fn delete_booking(&self, id: BookingId) -> Result<(), StoreError>;

    // -- Memberships ------------------------------------------------------

    /// Looks up the unique membership row for (room, user), if any.
    async fn get_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Option<RoomMembership>, StoreError>;

    /// Lists a room's membership rows.
    async fn list_memberships(&self, room_id: RoomId) -> Result<Vec<RoomMembership>, StoreError>;

    /// Creates a membership row. Fails with
    /// [`StoreError::MembershipExists`] if one already exists.
    async fn insert_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), StoreError>;

    /// Changes the role on an existing membership row.
    async fn update_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), StoreError>;

    /// Removes a membership row.
    async fn delete_membership(&self, room_id: RoomId, user_id: UserId)
    -> Result<(), StoreError>;

    // -- Rooms ------------------------------------------------------------

    /// Creates a room together with its owner's admin membership.
    ///
    /// Atomic: both records exist afterwards or neither does. A room
    /// without an admin would be unmanageable, and a dangling membership
    /// would point at nothing.
    async fn create_room_with_owner(
        &self,
        name: String,
        description: String,
        owner: UserId,
    ) -> Result<Room, StoreError>;

    /// Fetches one room by id.
    async fn get_room(&self, id: RoomId) -> Result<Room, StoreError>;

    /// Lists all rooms.
    async fn list_rooms(&self) -> Result<Vec<Room>, StoreError>;

    /// Lists the rooms a user holds a membership in.
    async fn rooms_for_user(&self, user_id: UserId) -> Result<Vec<Room>, StoreError>;

    /// Rewrites a room's name and description.
    async fn update_room(
        &self,
        id: RoomId,
        name: String,
        description: String,
    ) -> Result<Room, StoreError>;

    /// Deletes a room, cascading to its bookings and memberships.
    async fn delete_room(&self, id: RoomId) -> Result<(), StoreError>;

    // -- Users ------------------------------------------------------------

    /// Fetches one user by id.
    async fn get_user(&self, id: UserId) -> Result<User, StoreError>;

    /// Registers a user. Registration itself (passwords, email
    /// verification) is outside this system; this is the record the
    /// auth provider hands over.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;
}
