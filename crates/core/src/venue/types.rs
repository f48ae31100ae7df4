//! Core venue data types.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Pricing tier of a seat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    Regular,
    Premium,
    Vip,
}

impl SeatKind {
    /// Price of one seat of this tier, in the venue's base currency unit.
    pub fn price(&self) -> u64 {
        match self {
            SeatKind::Regular => 100,
            SeatKind::Premium => 200,
            SeatKind::Vip => 500,
        }
    }

    /// Returns the tier as a string (for filtering and logging).
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatKind::Regular => "regular",
            SeatKind::Premium => "premium",
            SeatKind::Vip => "vip",
        }
    }
}

/// Occupancy status of a seat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SeatStatus {
    Available = 0,
    Booked = 1,
}

impl SeatStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => SeatStatus::Available,
            _ => SeatStatus::Booked,
        }
    }

    /// Returns the status as a string (for filtering and logging).
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Booked => "booked",
        }
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single seat in a venue.
///
/// Identity fields are immutable; only the status cell changes over the
/// seat's lifetime. The status is an atomic so external readers can observe
/// it at any time, but the only write path is the reservation engine while
/// it holds this seat's lock.
#[derive(Debug)]
pub struct Seat {
    seat_id: String,
    kind: SeatKind,
    status: AtomicU8,
}

impl Seat {
    /// Create a new available seat.
    pub fn new(seat_id: impl Into<String>, kind: SeatKind) -> Self {
        Self {
            seat_id: seat_id.into(),
            kind,
            status: AtomicU8::new(SeatStatus::Available as u8),
        }
    }

    /// Unique identifier within the owning venue.
    pub fn seat_id(&self) -> &str {
        &self.seat_id
    }

    /// Pricing tier.
    pub fn kind(&self) -> SeatKind {
        self.kind
    }

    /// Current occupancy status.
    pub fn status(&self) -> SeatStatus {
        SeatStatus::from_u8(self.status.load(Ordering::SeqCst))
    }

    /// Whether the seat can currently be booked.
    pub fn is_available(&self) -> bool {
        self.status() == SeatStatus::Available
    }

    /// Transition the seat status. Callers must hold this seat's lock.
    pub(crate) fn set_status(&self, status: SeatStatus) {
        self.status.store(status as u8, Ordering::SeqCst);
    }
}

// Seat identity is the seat id; status and tier are attributes.
impl PartialEq for Seat {
    fn eq(&self, other: &Self) -> bool {
        self.seat_id == other.seat_id
    }
}

impl Eq for Seat {}

impl std::hash::Hash for Seat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.seat_id.hash(state);
    }
}

impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Seat", 3)?;
        s.serialize_field("seat_id", &self.seat_id)?;
        s.serialize_field("kind", &self.kind)?;
        s.serialize_field("status", &self.status())?;
        s.end()
    }
}

/// A venue: an ordered collection of seats at a location.
///
/// The seat list is mutable only through `&mut self` admin operations, which
/// run before the venue is shared with the engine.
#[derive(Debug)]
pub struct Venue {
    venue_id: String,
    location: String,
    seats: Vec<Arc<Seat>>,
}

impl Venue {
    /// Create a new venue from an ordered seat list.
    pub fn new(venue_id: impl Into<String>, location: impl Into<String>, seats: Vec<Seat>) -> Self {
        Self {
            venue_id: venue_id.into(),
            location: location.into(),
            seats: seats.into_iter().map(Arc::new).collect(),
        }
    }

    /// Venue identifier.
    pub fn venue_id(&self) -> &str {
        &self.venue_id
    }

    /// Human-readable location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Ordered seat list.
    pub fn seats(&self) -> &[Arc<Seat>] {
        &self.seats
    }

    /// Look up a seat by id.
    pub fn seat(&self, seat_id: &str) -> Option<&Arc<Seat>> {
        self.seats.iter().find(|s| s.seat_id() == seat_id)
    }

    /// Append a seat. Admin operation, requires exclusive ownership.
    pub fn add_seat(&mut self, seat: Seat) {
        self.seats.push(Arc::new(seat));
    }

    /// Remove a seat by id. Admin operation, requires exclusive ownership.
    /// Returns true if a seat was removed.
    pub fn remove_seat(&mut self, seat_id: &str) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s.seat_id() != seat_id);
        self.seats.len() != before
    }
}

/// A scheduled show at a venue.
#[derive(Debug)]
pub struct EventShow {
    event_id: String,
    starts_at: DateTime<Utc>,
    venue: Arc<Venue>,
}

impl EventShow {
    /// Create a new event backed by a venue.
    pub fn new(event_id: impl Into<String>, starts_at: DateTime<Utc>, venue: Arc<Venue>) -> Self {
        Self {
            event_id: event_id.into(),
            starts_at,
            venue,
        }
    }

    /// Event identifier.
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Scheduled start time.
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// The venue hosting the show.
    pub fn venue(&self) -> &Arc<Venue> {
        &self.venue
    }
}
