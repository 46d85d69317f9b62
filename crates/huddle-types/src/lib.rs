//! Core domain types for Huddle.
//!
//! This crate defines the vocabulary the rest of the system speaks:
//!
//! - **Identity** ([`UserId`], [`RoomId`], [`BookingId`]): newtype ids
//!   that can't be mixed up with each other.
//! - **Role** ([`Role`]): the closed set of room-scoped permission
//!   levels.
//! - **TimeSlot** ([`TimeSlot`]): a validated half-open time interval;
//!   the overlap rule for booking conflicts lives here.
//! - **Entities** ([`Room`], [`Booking`], [`RoomMembership`], [`User`]):
//!   the records that flow between the core and the storage layer.
//!
//! # Architecture
//!
//! This is the leaf crate: no I/O, no async, no storage. Everything above
//! (store, core, facade) depends on it; it depends on nothing but serde
//! and chrono.

mod entity;
mod ids;
mod role;
mod slot;

pub use entity::{Booking, NewBooking, Room, RoomMembership, User};
pub use ids::{BookingId, RoomId, UserId};
pub use role::Role;
pub use slot::{InvalidInterval, TimeSlot};
