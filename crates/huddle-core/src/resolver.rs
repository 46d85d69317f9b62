//! Role resolution: which role does a user hold in a room?

use std::sync::Arc;

use huddle_store::BookingStore;
use huddle_types::{Role, RoomId, UserId};

use crate::CoreError;

/// Resolves a user's role within a specific room.
///
/// Looks up the unique membership row for (room, user); absence maps to
/// [`Role::None`]. Pure query, no side effects.
///
/// Resolution is never cached across requests. An admin in another
/// session can demote or remove a user at any moment, so every
/// authorization decision re-reads the row it is about to rely on.
pub struct RoleResolver<S> {
    store: Arc<S>,
}

// Manual impl: `#[derive(Clone)]` would demand `S: Clone`, but cloning
// the resolver only clones the `Arc`.
impl<S> Clone for RoleResolver<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: BookingStore> RoleResolver<S> {
    /// Creates a resolver over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the user's role in the room, [`Role::None`] if the user
    /// holds no membership there.
    ///
    /// A room that does not exist has no membership rows, so every user
    /// resolves to `None` in it; existence checks belong to the
    /// operations that need them.
    pub async fn resolve(&self, room_id: RoomId, user_id: UserId) -> Result<Role, CoreError> {
        let membership = self.store.get_membership(room_id, user_id).await?;
        Ok(membership.map(|m| m.role).unwrap_or(Role::None))
    }
}
