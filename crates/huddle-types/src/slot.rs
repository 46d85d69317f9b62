//! Time slots: validated half-open booking intervals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The interval was not well-formed: `start` must be strictly before
/// `end`. Zero-length and reversed intervals are both rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid interval: start {start} is not before end {end}")]
pub struct InvalidInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open time interval `[start, end)`.
///
/// Half-open means the start instant belongs to the slot and the end
/// instant does not. That convention is what makes back-to-back bookings
/// work: a meeting ending at 11:00 and one starting at 11:00 share an
/// instant on the clock but not a moment of room time, so they do not
/// conflict.
///
/// The fields are private and the only constructor validates
/// `start < end`, so every `TimeSlot` in the system is well-formed by
/// construction. Downstream code (the conflict checker in particular)
/// relies on this and never re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SlotRepr", into = "SlotRepr")]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Creates a slot, rejecting `start >= end` with [`InvalidInterval`].
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidInterval> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidInterval { start, end })
        }
    }

    /// The inclusive start instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The exclusive end instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns `true` if the two slots overlap.
    ///
    /// Two half-open intervals `[s1, e1)` and `[s2, e2)` overlap iff
    /// `s1 < e2 && s2 < e1`. Touching slots (`e1 == s2` or `e2 == s1`)
    /// do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The on-the-wire shape of a slot.
///
/// Deserializing goes through `TryFrom`, so a JSON payload with
/// `start >= end` fails to parse instead of producing an invalid slot.
#[derive(Serialize, Deserialize)]
struct SlotRepr {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<SlotRepr> for TimeSlot {
    type Error = InvalidInterval;

    fn try_from(repr: SlotRepr) -> Result<Self, Self::Error> {
        TimeSlot::new(repr.start, repr.end)
    }
}

impl From<TimeSlot> for SlotRepr {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: slot.start,
            end: slot.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Shorthand: a slot on 2025-06-02 from `h1:m1` to `h2:m2` UTC.
    fn slot(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeSlot {
        let day = |h, m| Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap();
        TimeSlot::new(day(h1, m1), day(h2, m2)).unwrap()
    }

    #[test]
    fn test_new_rejects_reversed_interval() {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 11, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        assert!(TimeSlot::new(start, end).is_err());
    }

    #[test]
    fn test_new_rejects_zero_length_interval() {
        let t = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        assert!(TimeSlot::new(t, t).is_err());
    }

    #[test]
    fn test_overlaps_partial_overlap() {
        // [10:00, 11:00) vs [10:30, 11:30): overlap.
        assert!(slot(10, 0, 11, 0).overlaps(&slot(10, 30, 11, 30)));
        assert!(slot(10, 30, 11, 30).overlaps(&slot(10, 0, 11, 0)));
    }

    #[test]
    fn test_overlaps_containment() {
        // [10:00, 12:00) contains [10:30, 11:00).
        assert!(slot(10, 0, 12, 0).overlaps(&slot(10, 30, 11, 0)));
        assert!(slot(10, 30, 11, 0).overlaps(&slot(10, 0, 12, 0)));
    }

    #[test]
    fn test_overlaps_identical_slots() {
        assert!(slot(10, 0, 11, 0).overlaps(&slot(10, 0, 11, 0)));
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        // [10:00, 11:00) then [11:00, 12:00): back to back, no conflict.
        assert!(!slot(10, 0, 11, 0).overlaps(&slot(11, 0, 12, 0)));
        assert!(!slot(11, 0, 12, 0).overlaps(&slot(10, 0, 11, 0)));
    }

    #[test]
    fn test_disjoint_slots_do_not_overlap() {
        assert!(!slot(9, 0, 10, 0).overlaps(&slot(14, 0, 15, 0)));
    }

    #[test]
    fn test_slot_round_trips_through_json() {
        let original = slot(10, 0, 11, 0);
        let json = serde_json::to_string(&original).unwrap();
        let decoded: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_deserializing_reversed_interval_fails() {
        // The TryFrom conversion rejects invalid payloads at parse time,
        // so a malformed slot can't enter the system through JSON either.
        let json = r#"{"start":"2025-06-02T11:00:00Z","end":"2025-06-02T10:00:00Z"}"#;
        let result: Result<TimeSlot, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
