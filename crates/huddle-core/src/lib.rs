//! The booking core: conflict detection and room-scoped authorization.
//!
//! Everything else in Huddle is plumbing around the four components in
//! this crate. These are the rules whose bugs are externally visible as
//! double-booked rooms or privilege leaks:
//!
//! - [`RoleResolver`]: determines a user's [`Role`](huddle_types::Role)
//!   within a specific room.
//! - [`ConflictChecker`]: decides whether a candidate slot overlaps any
//!   existing booking in a room.
//! - [`BookingScheduler`]: orchestrates create/update of a booking:
//!   validates the interval, checks conflicts, delegates to storage.
//! - [`RoomAccessGuard`]: the policy table mapping (role, [`Action`])
//!   to allow or deny.
//!
//! Plus one supporting piece: [`RoomLocks`], the per-room write lock that
//! closes the check-then-act race between the conflict check and the
//! booking write.
//!
//! # Statelessness
//!
//! No component here caches anything between calls. Roles and booking
//! lists are re-read from the store on every operation, because another
//! session can change them between two requests. Each component is a pure
//! function of (current store state, arguments).

mod conflict;
mod error;
mod guard;
mod locks;
mod resolver;
mod scheduler;

pub use conflict::ConflictChecker;
pub use error::CoreError;
pub use guard::{Action, RoomAccessGuard};
pub use locks::RoomLocks;
pub use resolver::RoleResolver;
pub use scheduler::BookingScheduler;
