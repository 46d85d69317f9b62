//! Room-scoped authorization: the policy table.

use std::fmt;
use std::sync::Arc;

use huddle_store::BookingStore;
use huddle_types::{Role, RoomId, UserId};

use crate::{CoreError, RoleResolver};

/// An action a caller can request within a room.
///
/// Booking edits and deletes come in an "own" and an "any" flavor: the
/// caller of [`RoomAccessGuard::authorize`] compares the booking's owner
/// against the acting user and picks the matching variant (see
/// [`Action::edit_booking`] / [`Action::delete_booking`]). That keeps
/// ownership a fact decided once, at the call site that has the booking
/// in hand, and keeps the policy table itself a pure (role, action)
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewBookings,
    CreateBooking,
    EditOwnBooking,
    EditAnyBooking,
    DeleteOwnBooking,
    DeleteAnyBooking,
    JoinRoom,
    ManageMembers,
    EditRoom,
    DeleteRoom,
}

impl Action {
    /// Picks the edit action for a booking: `EditOwnBooking` when the
    /// caller owns it, `EditAnyBooking` otherwise.
    pub fn edit_booking(owner: UserId, caller: UserId) -> Self {
        if owner == caller {
            Self::EditOwnBooking
        } else {
            Self::EditAnyBooking
        }
    }

    /// Picks the delete action for a booking, same ownership rule as
    /// [`Action::edit_booking`].
    pub fn delete_booking(owner: UserId, caller: UserId) -> Self {
        if owner == caller {
            Self::DeleteOwnBooking
        } else {
            Self::DeleteAnyBooking
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ViewBookings => "view bookings",
            Self::CreateBooking => "create a booking",
            Self::EditOwnBooking => "edit their own booking",
            Self::EditAnyBooking => "edit another member's booking",
            Self::DeleteOwnBooking => "delete their own booking",
            Self::DeleteAnyBooking => "delete another member's booking",
            Self::JoinRoom => "join the room",
            Self::ManageMembers => "manage members",
            Self::EditRoom => "edit the room",
            Self::DeleteRoom => "delete the room",
        };
        f.write_str(name)
    }
}

/// Gates every room-scoped operation behind the role policy table.
///
/// | action | none | member | admin |
/// |---|---|---|---|
/// | JoinRoom | allow | AlreadyMember | AlreadyMember |
/// | ViewBookings, CreateBooking | deny | allow | allow |
/// | Edit/DeleteOwnBooking | deny | allow | allow |
/// | Edit/DeleteAnyBooking | deny | deny | allow |
/// | ManageMembers, EditRoom, DeleteRoom | deny | deny | allow |
///
/// The match below is exhaustive over both enums with no wildcard role
/// arm, so adding a role variant forces every row of this table to be
/// revisited at compile time. Denials are typed errors, never silent
/// no-ops.
pub struct RoomAccessGuard<S> {
    resolver: RoleResolver<S>,
}

impl<S> Clone for RoomAccessGuard<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
        }
    }
}

impl<S: BookingStore> RoomAccessGuard<S> {
    /// Creates a guard resolving roles from the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            resolver: RoleResolver::new(store),
        }
    }

    /// Checks whether `user` may perform `action` in `room`.
    ///
    /// Resolves the role fresh from the store (no caching), then applies
    /// the policy table. Returns the resolved role on allow so callers
    /// can thread it into follow-up decisions without a second lookup
    /// in the same request.
    ///
    /// # Errors
    /// - [`CoreError::Forbidden`] when the role does not permit the
    ///   action.
    /// - [`CoreError::AlreadyMember`] for a join by an existing member.
    pub async fn authorize(
        &self,
        room_id: RoomId,
        user_id: UserId,
        action: Action,
    ) -> Result<Role, CoreError> {
        let role = self.resolver.resolve(room_id, user_id).await?;

        let allowed = match (action, role) {
            // Joining is the one action granted to outsiders; for
            // existing members it reports the membership instead.
            (Action::JoinRoom, Role::None) => true,
            (Action::JoinRoom, Role::Member | Role::Admin) => {
                return Err(CoreError::AlreadyMember { room_id, user_id });
            }

            // Member-level actions.
            (
                Action::ViewBookings
                | Action::CreateBooking
                | Action::EditOwnBooking
                | Action::DeleteOwnBooking,
                Role::Member | Role::Admin,
            ) => true,
            (
                Action::ViewBookings
                | Action::CreateBooking
                | Action::EditOwnBooking
                | Action::DeleteOwnBooking,
                Role::None,
            ) => false,

            // Admin-level actions.
            (
                Action::EditAnyBooking
                | Action::DeleteAnyBooking
                | Action::ManageMembers
                | Action::EditRoom
                | Action::DeleteRoom,
                Role::Admin,
            ) => true,
            (
                Action::EditAnyBooking
                | Action::DeleteAnyBooking
                | Action::ManageMembers
                | Action::EditRoom
                | Action::DeleteRoom,
                Role::None | Role::Member,
            ) => false,
        };

        if allowed {
            Ok(role)
        } else {
            tracing::debug!(%room_id, %user_id, %action, %role, "action denied");
            Err(CoreError::Forbidden {
                room_id,
                user_id,
                action,
            })
        }
    }
}
