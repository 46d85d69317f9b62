//! In-memory reference implementation of [`BookingStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use huddle_types::{Booking, BookingId, NewBooking, Role, Room, RoomId, RoomMembership, TimeSlot, User, UserId};
use tokio::sync::Mutex;

use crate::{BookingStore, StoreError};

/// All tables, behind one lock.
///
/// A single `Mutex` over the whole dataset is what makes the multi-table
/// operations (`create_room_with_owner`, `delete_room`) atomic: every
/// method takes the lock once, mutates, and releases. A real database
/// backend gets the same guarantees from transactions.
#[derive(Default)]
struct Tables {
    rooms: HashMap<RoomId, Room>,
    bookings: HashMap<BookingId, Booking>,
    /// Membership rows, keyed by (room, user). Using the pair as the map
    /// key is what enforces "at most one role per user per room".
    memberships: HashMap<(RoomId, UserId), Role>,
    users: HashMap<UserId, User>,
}

/// An in-memory [`BookingStore`] backed by hash maps.
///
/// This is the backend used by every test in the workspace and by the
/// demo binary. It implements the storage contract faithfully, including
/// the atomicity and cascade rules, but performs no overlap checking of
/// its own: booking conflicts are the scheduler's concern, enforced under
/// the per-room write lock in the core.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    next_room_id: AtomicU64,
    next_booking_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            next_room_id: AtomicU64::new(1),
            next_booking_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingStore for MemoryStore {
    async fn list_bookings(&self, room_id: RoomId) -> Result<Vec<Booking>, StoreError> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.room_id == room_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.slot.start());
        Ok(bookings)
    }

    async fn list_bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, StoreError> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.slot.start());
        Ok(bookings)
    }

    async fn get_booking(&self, id: BookingId) -> Result<Booking, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .bookings
            .get(&id)
            .cloned()
            .ok_or(StoreError::BookingNotFound(id))
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.rooms.contains_key(&booking.room_id) {
            return Err(StoreError::RoomNotFound(booking.room_id));
        }

        let id = BookingId(self.next_booking_id.fetch_add(1, Ordering::Relaxed));
        let materialized = Booking {
            id,
            room_id: booking.room_id,
            user_id: booking.user_id,
            slot: booking.slot,
            description: booking.description,
        };
        tables.bookings.insert(id, materialized.clone());
        Ok(materialized)
    }

    async fn update_booking(
        &self,
        id: BookingId,
        slot: TimeSlot,
        description: Option<String>,
    ) -> Result<Booking, StoreError> {
        let mut tables = self.tables.lock().await;
        let booking = tables
            .bookings
            .get_mut(&id)
            .ok_or(StoreError::BookingNotFound(id))?;
        booking.slot = slot;
        booking.description = description;
        Ok(booking.clone())
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::BookingNotFound(id))
    }

    async fn get_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<Option<RoomMembership>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .memberships
            .get(&(room_id, user_id))
            .map(|role| RoomMembership {
                room_id,
                user_id,
                role: *role,
            }))
    }

    async fn list_memberships(&self, room_id: RoomId) -> Result<Vec<RoomMembership>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<RoomMembership> = tables
            .memberships
            .iter()
            .filter(|((rid, _), _)| *rid == room_id)
            .map(|((rid, uid), role)| RoomMembership {
                room_id: *rid,
                user_id: *uid,
                role: *role,
            })
            .collect();
        rows.sort_by_key(|m| m.user_id);
        Ok(rows)
    }

    async fn insert_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables.rooms.contains_key(&room_id) {
            return Err(StoreError::RoomNotFound(room_id));
        }
        if tables.memberships.contains_key(&(room_id, user_id)) {
            return Err(StoreError::MembershipExists { room_id, user_id });
        }
        tables.memberships.insert((room_id, user_id), role);
        Ok(())
    }

    async fn update_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
        role: Role,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        match tables.memberships.get_mut(&(room_id, user_id)) {
            Some(stored) => {
                *stored = role;
                Ok(())
            }
            None => Err(StoreError::MembershipNotFound { room_id, user_id }),
        }
    }

    async fn delete_membership(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables
            .memberships
            .remove(&(room_id, user_id))
            .map(|_| ())
            .ok_or(StoreError::MembershipNotFound { room_id, user_id })
    }

    async fn create_room_with_owner(
        &self,
        name: String,
        description: String,
        owner: UserId,
    ) -> Result<Room, StoreError> {
        let mut tables = self.tables.lock().await;

        let id = RoomId(self.next_room_id.fetch_add(1, Ordering::Relaxed));
        let room = Room {
            id,
            name,
            description,
        };

        // Both inserts happen under the same lock acquisition, so no
        // caller can observe the room without its admin membership.
        tables.rooms.insert(id, room.clone());
        tables.memberships.insert((id, owner), Role::Admin);

        tracing::debug!(room_id = %id, owner = %owner, "room created with owner");
        Ok(room)
    }

    async fn get_room(&self, id: RoomId) -> Result<Room, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .rooms
            .get(&id)
            .cloned()
            .ok_or(StoreError::RoomNotFound(id))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rooms: Vec<Room> = tables.rooms.values().cloned().collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn rooms_for_user(&self, user_id: UserId) -> Result<Vec<Room>, StoreError> {
        let tables = self.tables.lock().await;
        let mut rooms: Vec<Room> = tables
            .memberships
            .keys()
            .filter(|(_, uid)| *uid == user_id)
            .filter_map(|(rid, _)| tables.rooms.get(rid))
            .cloned()
            .collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn update_room(
        &self,
        id: RoomId,
        name: String,
        description: String,
    ) -> Result<Room, StoreError> {
        let mut tables = self.tables.lock().await;
        let room = tables.rooms.get_mut(&id).ok_or(StoreError::RoomNotFound(id))?;
        room.name = name;
        room.description = description;
        Ok(room.clone())
    }

    async fn delete_room(&self, id: RoomId) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.rooms.remove(&id).is_none() {
            return Err(StoreError::RoomNotFound(id));
        }

        // Cascade: a deleted room takes its bookings and memberships
        // with it, same as a database foreign key with ON DELETE CASCADE.
        tables.bookings.retain(|_, b| b.room_id != id);
        tables.memberships.retain(|(rid, _), _| *rid != id);

        tracing::debug!(room_id = %id, "room deleted with cascade");
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<User, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .users
            .get(&id)
            .cloned()
            .ok_or(StoreError::UserNotFound(id))
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.users.insert(user.id, user);
        Ok(())
    }
}
