//! `RoomService`: the operation surface a front end drives.
//!
//! Every method takes the acting user as an explicit first parameter.
//! There is no ambient "current user" anywhere in the stack; whoever
//! drives the service (an HTTP layer, a test, the demo binary) resolves
//! identity and threads it through. Each call re-resolves the caller's
//! role and re-checks conflicts against current stored data, so nothing
//! here holds mutable state between calls.
//!
//! The flow for every guarded operation is the same:
//!
//! ```text
//! caller -> RoomAccessGuard (role policy) -> BookingScheduler / store -> result
//! ```
//!
//! and a denied caller never reaches the guarded operation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use huddle_core::{Action, BookingScheduler, RoomAccessGuard, RoomLocks};
use huddle_store::{BookingStore, StoreError};
use huddle_types::{Booking, BookingId, Role, Room, RoomId, User, UserId};
use serde::{Deserialize, Serialize};

use crate::HuddleError;

/// A membership row joined with the member's user record, as shown on
/// the member-management screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// The booking service facade.
///
/// Owns the access guard, the scheduler, and a handle to the store, and
/// wires them together per operation. Cheap to clone; clones share the
/// same store and the same per-room lock registry.
pub struct RoomService<S> {
    store: Arc<S>,
    guard: RoomAccessGuard<S>,
    scheduler: BookingScheduler<S>,
}

impl<S> Clone for RoomService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            guard: self.guard.clone(),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<S: BookingStore> RoomService<S> {
    /// Creates a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        let guard = RoomAccessGuard::new(Arc::clone(&store));
        let scheduler = BookingScheduler::new(Arc::clone(&store), RoomLocks::new());
        Self {
            store,
            guard,
            scheduler,
        }
    }

    // -- Rooms ------------------------------------------------------------

    /// Creates a room and atomically grants `user` the first admin
    /// membership. Any authenticated user may create a room.
    pub async fn create_room(
        &self,
        user_id: UserId,
        name: String,
        description: String,
    ) -> Result<Room, HuddleError> {
        let room = self
            .store
            .create_room_with_owner(name, description, user_id)
            .await?;
        tracing::info!(room_id = %room.id, owner = %user_id, "room created");
        Ok(room)
    }

    /// Renames or re-describes a room. Admin only.
    pub async fn edit_room(
        &self,
        user_id: UserId,
        room_id: RoomId,
        name: String,
        description: String,
    ) -> Result<Room, HuddleError> {
        self.guard.authorize(room_id, user_id, Action::EditRoom).await?;
        let room = self.store.update_room(room_id, name, description).await?;
        tracing::info!(%room_id, %user_id, "room edited");
        Ok(room)
    }

    /// Deletes a room with its bookings and memberships. Admin only.
    pub async fn delete_room(&self, user_id: UserId, room_id: RoomId) -> Result<(), HuddleError> {
        self.guard
            .authorize(room_id, user_id, Action::DeleteRoom)
            .await?;
        self.store.delete_room(room_id).await?;
        tracing::info!(%room_id, %user_id, "room deleted");
        Ok(())
    }

    /// Fetches one room. Rooms are browsable by any authenticated user;
    /// it is the bookings inside that are membership-gated.
    pub async fn room(&self, room_id: RoomId) -> Result<Room, HuddleError> {
        Ok(self.store.get_room(room_id).await?)
    }

    /// Lists all rooms (the "rooms to join" browse screen).
    pub async fn list_rooms(&self) -> Result<Vec<Room>, HuddleError> {
        Ok(self.store.list_rooms().await?)
    }

    // -- Membership -------------------------------------------------------

    /// Joins the caller to a room as a member. Self-granted: this is the
    /// one action available to users with no membership.
    ///
    /// Idempotent at the row level: a second join reports
    /// `AlreadyMember` and leaves the single existing row untouched.
    pub async fn join_room(&self, user_id: UserId, room_id: RoomId) -> Result<(), HuddleError> {
        self.guard
            .authorize(room_id, user_id, Action::JoinRoom)
            .await?;

        // Two concurrent joins can both pass the guard; the store's
        // uniqueness rule decides the race and the loser reports
        // AlreadyMember, same as if the guard had caught it.
        match self
            .store
            .insert_membership(room_id, user_id, Role::Member)
            .await
        {
            Ok(()) => {
                tracing::info!(%room_id, %user_id, "user joined room");
                Ok(())
            }
            Err(StoreError::MembershipExists { room_id, user_id }) => {
                Err(huddle_core::CoreError::AlreadyMember { room_id, user_id }.into())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Removes the caller's own membership.
    ///
    /// Leaving is self-service for every member, admins included; it is
    /// the one membership deletion that does not require `ManageMembers`.
    pub async fn leave_room(&self, user_id: UserId, room_id: RoomId) -> Result<(), HuddleError> {
        self.store.delete_membership(room_id, user_id).await?;
        tracing::info!(%room_id, %user_id, "user left room");
        Ok(())
    }

    /// Adds a member with the given role. Admin only; the stored role
    /// must be `Member` or `Admin`.
    pub async fn add_member(
        &self,
        actor: UserId,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), HuddleError> {
        self.guard
            .authorize(room_id, actor, Action::ManageMembers)
            .await?;
        require_storable(role)?;
        self.store.insert_membership(room_id, user_id, role).await?;
        tracing::info!(%room_id, %actor, member = %user_id, %role, "member added");
        Ok(())
    }

    /// Changes an existing member's role. Admin only.
    pub async fn change_role(
        &self,
        actor: UserId,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), HuddleError> {
        self.guard
            .authorize(room_id, actor, Action::ManageMembers)
            .await?;
        require_storable(role)?;
        self.store.update_membership(room_id, user_id, role).await?;
        tracing::info!(%room_id, %actor, member = %user_id, %role, "member role changed");
        Ok(())
    }

    /// Removes another user's membership. Admin only.
    pub async fn remove_member(
        &self,
        actor: UserId,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<(), HuddleError> {
        self.guard
            .authorize(room_id, actor, Action::ManageMembers)
            .await?;
        self.store.delete_membership(room_id, user_id).await?;
        tracing::info!(%room_id, %actor, member = %user_id, "member removed");
        Ok(())
    }

    /// Lists a room's members with their user records. Admin only (this
    /// backs the member-management screen).
    pub async fn members(
        &self,
        actor: UserId,
        room_id: RoomId,
    ) -> Result<Vec<MemberInfo>, HuddleError> {
        self.guard
            .authorize(room_id, actor, Action::ManageMembers)
            .await?;

        let rows = self.store.list_memberships(room_id).await?;
        let mut members = Vec::with_capacity(rows.len());
        for row in rows {
            // A membership can outlive its user record (user deleted by
            // the auth provider). Show the row anyway; only a genuine
            // backend failure propagates.
            let (name, email) = match self.store.get_user(row.user_id).await {
                Ok(User { name, email, .. }) => (name, email),
                Err(StoreError::UserNotFound(_)) => ("unknown".into(), "unknown".into()),
                Err(other) => return Err(other.into()),
            };
            members.push(MemberInfo {
                user_id: row.user_id,
                name,
                email,
                role: row.role,
            });
        }
        Ok(members)
    }

    // -- Bookings ---------------------------------------------------------

    /// Lists a room's bookings, ordered by start time. Members only.
    pub async fn bookings(
        &self,
        user_id: UserId,
        room_id: RoomId,
    ) -> Result<Vec<Booking>, HuddleError> {
        self.guard
            .authorize(room_id, user_id, Action::ViewBookings)
            .await?;
        Ok(self.store.list_bookings(room_id).await?)
    }

    /// Books `[start, end)` in a room for the caller. Members only; the
    /// slot must be valid and free.
    pub async fn create_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Booking, HuddleError> {
        self.guard
            .authorize(room_id, user_id, Action::CreateBooking)
            .await?;
        Ok(self
            .scheduler
            .create(room_id, user_id, start, end, description)
            .await?)
    }

    /// Moves or re-describes a booking. The owner may edit their own;
    /// an admin may edit any.
    pub async fn update_booking(
        &self,
        user_id: UserId,
        booking_id: BookingId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        description: Option<String>,
    ) -> Result<Booking, HuddleError> {
        let booking = self.store.get_booking(booking_id).await?;
        let action = Action::edit_booking(booking.user_id, user_id);
        self.guard
            .authorize(booking.room_id, user_id, action)
            .await?;
        Ok(self
            .scheduler
            .update(booking_id, start, end, description)
            .await?)
    }

    /// Deletes a booking. The owner may delete their own; an admin may
    /// delete any.
    pub async fn delete_booking(
        &self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> Result<(), HuddleError> {
        let booking = self.store.get_booking(booking_id).await?;
        let action = Action::delete_booking(booking.user_id, user_id);
        self.guard
            .authorize(booking.room_id, user_id, action)
            .await?;
        self.store.delete_booking(booking_id).await?;
        tracing::info!(%booking_id, %user_id, room_id = %booking.room_id, "booking deleted");
        Ok(())
    }

    // -- Dashboard --------------------------------------------------------

    /// The rooms the caller holds a membership in.
    pub async fn rooms_for_user(&self, user_id: UserId) -> Result<Vec<Room>, HuddleError> {
        Ok(self.store.rooms_for_user(user_id).await?)
    }

    /// The caller's own bookings across all rooms, ordered by start.
    pub async fn bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, HuddleError> {
        Ok(self.store.list_bookings_for_user(user_id).await?)
    }
}

/// Rejects `Role::None` where a storable row role is required.
fn require_storable(role: Role) -> Result<(), HuddleError> {
    match role {
        Role::None => Err(huddle_core::CoreError::InvalidRole.into()),
        Role::Member | Role::Admin => Ok(()),
    }
}
