//! Identity newtypes.
//!
//! Users, rooms, and bookings are all identified by a `u64` under the
//! hood, but each gets its own wrapper type. The wrappers cost nothing at
//! runtime and buy two things:
//!
//! 1. **Type safety**: you can't pass a `RoomId` where a `UserId` is
//!    expected, even though both are a `u64` underneath.
//! 2. **Readability**: `fn resolve(room: RoomId, user: UserId)` says more
//!    than `fn resolve(a: u64, b: u64)`.
//!
//! `#[serde(transparent)]` makes each id serialize as the bare number,
//! so `RoomId(7)` is just `7` in JSON, not `{"0": 7}`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// A unique identifier for a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means UserId(42) becomes `42` in JSON.
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_user_id_deserializes_from_plain_number() {
        let id: UserId = serde_json::from_str("42").unwrap();
        assert_eq!(id, UserId(42));
    }

    #[test]
    fn test_id_display_prefixes() {
        assert_eq!(UserId(7).to_string(), "U-7");
        assert_eq!(RoomId(3).to_string(), "R-3");
        assert_eq!(BookingId(12).to_string(), "B-12");
    }
}
