//! # Huddle
//!
//! A shared meeting-room booking core: users join rooms, reserve time
//! slots, and room admins manage membership and bookings.
//!
//! The crate wires the layers together and re-exports them:
//! [`RoomService`] is the operation surface, backed by the policy guard
//! and scheduler from `huddle-core` and any [`BookingStore`]
//! implementation (tests and demos use [`MemoryStore`]).
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use huddle::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), HuddleError> {
//! let store = Arc::new(MemoryStore::new());
//! store.insert_user(User { id: UserId(1), name: "Ada".into(), email: "ada@example.com".into() }).await?;
//!
//! let service = RoomService::new(store);
//! let room = service.create_room(UserId(1), "Apollo".into(), "4th floor".into()).await?;
//! assert_eq!(service.rooms_for_user(UserId(1)).await?, vec![room]);
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::HuddleError;
pub use service::{MemberInfo, RoomService};

// Re-export the sub-crates' public surface so callers depend on one
// crate.
pub use huddle_core::{
    Action, BookingScheduler, ConflictChecker, CoreError, RoleResolver, RoomAccessGuard, RoomLocks,
};
pub use huddle_store::{BookingStore, MemoryStore, StoreError};
pub use huddle_types::{
    Booking, BookingId, InvalidInterval, NewBooking, Role, Room, RoomId, RoomMembership, TimeSlot,
    User, UserId,
};

/// The common imports, one `use` away.
pub mod prelude {
    pub use crate::{
        Action, Booking, BookingId, BookingStore, HuddleError, MemberInfo, MemoryStore, Role,
        Room, RoomId, RoomService, TimeSlot, User, UserId,
    };
}
