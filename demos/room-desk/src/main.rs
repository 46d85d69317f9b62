//! A scripted walkthrough of the booking core.
//!
//! Seeds an in-memory store with a few users, then plays out a typical
//! day: create a room, join it, book slots, hit a conflict, promote a
//! member, clean up. Run with `RUST_LOG=debug` to watch the core's
//! tracing output alongside the script.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use huddle::prelude::*;
use tracing_subscriber::EnvFilter;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Arc::new(MemoryStore::new());
    let ada = UserId(1);
    let ben = UserId(2);
    for (id, name) in [(ada, "Ada"), (ben, "Ben")] {
        store
            .insert_user(User {
                id,
                name: name.into(),
                email: format!("{}@example.com", name.to_lowercase()),
            })
            .await?;
    }

    let svc = RoomService::new(store);

    // Ada creates a room and is its first admin.
    let room = svc
        .create_room(ada, "Apollo".into(), "4th floor, seats 8".into())
        .await?;
    println!("created {} ({})", room.name, room.id);

    // Ben can't book yet: he is not a member.
    match svc.create_booking(ben, room.id, at(9, 0), at(10, 0), None).await {
        Err(err) => println!("ben before joining: {err}"),
        Ok(_) => unreachable!("outsiders must not book"),
    }

    // So he joins, and books the morning slot.
    svc.join_room(ben, room.id).await?;
    let standup = svc
        .create_booking(ben, room.id, at(9, 0), at(10, 0), Some("standup".into()))
        .await?;
    println!("ben booked {}", standup.slot);

    // Ada wants an overlapping slot: rejected.
    match svc.create_booking(ada, room.id, at(9, 30), at(10, 30), None).await {
        Err(err) => println!("ada's overlap: {err}"),
        Ok(_) => unreachable!("overlap must be rejected"),
    }

    // Back-to-back works though.
    let review = svc
        .create_booking(ada, room.id, at(10, 0), at(11, 0), Some("design review".into()))
        .await?;
    println!("ada booked {}", review.slot);

    // Ada promotes Ben; as an admin he may now cancel any booking.
    svc.change_role(ada, room.id, ben, Role::Admin).await?;
    svc.delete_booking(ben, review.id).await?;
    println!("ben (now admin) cancelled ada's review");

    let schedule = svc.bookings(ada, room.id).await?;
    println!("schedule: {}", serde_json::to_string_pretty(&schedule)?);

    Ok(())
}
