//! Storage layer for Huddle.
//!
//! This crate defines the seam between the booking core and whatever
//! actually persists data:
//!
//! 1. **The contract**: the [`BookingStore`] trait, a narrow query
//!    interface over rooms, bookings, memberships, and users.
//! 2. **The errors**: [`StoreError`], what a backend can report.
//! 3. **A reference backend**: [`MemoryStore`], an in-memory
//!    implementation used by tests and the demo.
//!
//! # How it fits in the stack
//!
//! ```text
//! Core (above)   <- resolves roles and checks conflicts through the trait
//!     |
//! Store (this crate)   <- the contract plus an in-memory backend
//!     |
//! Types (below)   <- Room, Booking, RoomMembership, ids
//! ```
//!
//! A production deployment swaps [`MemoryStore`] for a database-backed
//! implementation of the same trait; nothing above this crate changes.

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::BookingStore;
