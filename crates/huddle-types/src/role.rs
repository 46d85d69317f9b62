//! Room-scoped roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user's permission level within one specific room.
///
/// Roles are never global: the same user can be an admin of one room, a
/// plain member of another, and a stranger to the rest. Resolution always
/// goes through the room's membership table.
///
/// The set is closed on purpose. Every authorization decision matches
/// exhaustively over these three variants, so a new role can't slip
/// through an `_` arm unnoticed, and there is no stringly-typed role to
/// mistype.
///
/// The variants are declared in ascending order of privilege and the enum
/// derives `Ord`, so `Role::Admin > Role::Member > Role::None` holds.
///
/// `#[serde(rename_all = "lowercase")]` keeps the wire form (`"admin"`,
/// `"member"`, `"none"`) aligned with what membership rows store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No membership row exists for this (room, user) pair.
    ///
    /// This is a resolution result, not a storable role: a membership
    /// row always carries `Member` or `Admin`.
    #[default]
    None,

    /// May view the room's bookings, create bookings, and edit or delete
    /// their own bookings.
    Member,

    /// Everything a member may do, plus: edit or delete any booking,
    /// manage the member list, and edit or delete the room itself.
    Admin,
}

impl Role {
    /// Returns `true` if the user has any membership in the room.
    pub fn is_member(self) -> bool {
        matches!(self, Self::Member | Self::Admin)
    }

    /// Returns `true` for room administrators.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering_is_privilege_ordering() {
        assert!(Role::Admin > Role::Member);
        assert!(Role::Member > Role::None);
    }

    #[test]
    fn test_role_is_member() {
        assert!(!Role::None.is_member());
        assert!(Role::Member.is_member());
        assert!(Role::Admin.is_member());
    }

    #[test]
    fn test_role_is_admin() {
        assert!(!Role::None.is_admin());
        assert!(!Role::Member.is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Member).unwrap(), "\"member\"");
        assert_eq!(serde_json::to_string(&Role::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"member\"").unwrap();
        assert_eq!(role, Role::Member);
    }

    #[test]
    fn test_role_rejects_unknown_string() {
        let result: Result<Role, _> = serde_json::from_str("\"owner\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::None.to_string(), "none");
    }
}
