//! Domain entities: the records exchanged with the storage layer.

use serde::{Deserialize, Serialize};

use crate::{BookingId, Role, RoomId, TimeSlot, UserId};

/// A bookable meeting room.
///
/// A room has no single owner. Who may do what is governed entirely by
/// [`RoomMembership`] rows; the user who created the room simply holds
/// the first admin membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
}

/// The (room, user, role) relation granting room-scoped permissions.
///
/// Unique per (room, user): a user holds at most one role per room.
/// A stored row's role is always `Member` or `Admin`; `Role::None` is
/// what resolution reports when no row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMembership {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub role: Role,
}

/// A reserved time slot on a room.
///
/// Belongs to exactly one room and was created by exactly one user. The
/// slot is half-open, so a booking ending at 11:00 leaves the room free
/// from 11:00 on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub slot: TimeSlot,
    pub description: Option<String>,
}

/// A booking that has not been persisted yet.
///
/// The store assigns the id on insert and hands back the materialized
/// [`Booking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub slot: TimeSlot,
    pub description: Option<String>,
}

/// A registered user.
///
/// Deliberately has no role field: roles only exist per room, through
/// [`RoomMembership`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_booking_round_trips_through_json() {
        let slot = TimeSlot::new(
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap(),
        )
        .unwrap();
        let booking = Booking {
            id: BookingId(1),
            room_id: RoomId(2),
            user_id: UserId(3),
            slot,
            description: Some("sprint planning".into()),
        };
        let json = serde_json::to_string(&booking).unwrap();
        let decoded: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(booking, decoded);
    }

    #[test]
    fn test_membership_json_shape() {
        let membership = RoomMembership {
            room_id: RoomId(1),
            user_id: UserId(2),
            role: Role::Admin,
        };
        let json: serde_json::Value = serde_json::to_value(&membership).unwrap();
        assert_eq!(json["room_id"], 1);
        assert_eq!(json["user_id"], 2);
        assert_eq!(json["role"], "admin");
    }
}
