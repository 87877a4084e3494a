// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixed parking lot layout.
//!
//! The lot has 15 zones (`A` through `O`) holding between two and four
//! slots each, 45 slots in total. The layout never changes at runtime;
//! slots are seeded from it once and then only change status.

use crate::error::DomainError;
use crate::status::SlotStatus;
use serde::{Deserialize, Serialize};

/// Zone letter and slot count for every zone in the lot.
pub const LOT_LAYOUT: [(char, u8); 15] = [
    ('A', 4),
    ('B', 4),
    ('C', 3),
    ('D', 3),
    ('E', 2),
    ('F', 3),
    ('G', 4),
    ('H', 2),
    ('I', 3),
    ('J', 3),
    ('K', 2),
    ('L', 3),
    ('M', 4),
    ('N', 2),
    ('O', 3),
];

/// Returns the number of slots configured for a zone, if the zone exists.
#[must_use]
pub fn zone_capacity(zone: char) -> Option<u8> {
    LOT_LAYOUT
        .iter()
        .find(|(letter, _)| *letter == zone)
        .map(|(_, count)| *count)
}

/// Total number of slots in the lot.
#[must_use]
pub fn total_slots() -> usize {
    LOT_LAYOUT.iter().map(|(_, count)| usize::from(*count)).sum()
}

/// A slot identifier: zone letter followed by a 1-based slot number (e.g., `A3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotId {
    zone: char,
    number: u8,
}

impl SlotId {
    /// Parses and validates a slot identifier against the lot layout.
    ///
    /// Zone letters are accepted in either case and normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlotId` if the identifier is malformed or
    /// does not name a slot in the layout.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let mut chars = trimmed.chars();
        let zone: char = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .ok_or_else(|| DomainError::InvalidSlotId(value.to_string()))?;
        let number: u8 = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidSlotId(value.to_string()))?;

        match zone_capacity(zone) {
            Some(capacity) if (1..=capacity).contains(&number) => Ok(Self { zone, number }),
            _ => Err(DomainError::InvalidSlotId(value.to_string())),
        }
    }

    /// Returns the zone letter.
    #[must_use]
    pub const fn zone(&self) -> char {
        self.zone
    }

    /// Returns the zone code as a string (e.g., `"A"`).
    #[must_use]
    pub fn zone_code(&self) -> String {
        self.zone.to_string()
    }

    /// Returns the slot number within its zone.
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.zone, self.number)
    }
}

impl TryFrom<String> for SlotId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotId> for String {
    fn from(id: SlotId) -> Self {
        id.to_string()
    }
}

/// Display name for a zone (e.g., `Zone A`).
#[must_use]
pub fn zone_name(zone: char) -> String {
    format!("Zone {zone}")
}

/// A single parking slot and its current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// The slot identifier.
    pub id: SlotId,
    /// The zone code (e.g., `A`).
    pub zone: String,
    /// The zone display name (e.g., `Zone A`).
    pub zone_name: String,
    /// The current status.
    pub status: SlotStatus,
}

impl Slot {
    /// Creates a new available slot for the given identifier.
    #[must_use]
    pub fn new(id: SlotId) -> Self {
        Self {
            zone: id.zone_code(),
            zone_name: zone_name(id.zone()),
            id,
            status: SlotStatus::Available,
        }
    }

    /// Returns a copy of this slot with a different status.
    #[must_use]
    pub fn with_status(&self, status: SlotStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Produces every slot in the lot, in layout order, all `AVAILABLE`.
///
/// This is deterministic: the same layout always yields the same slots.
#[must_use]
pub fn seed_slots() -> Vec<Slot> {
    LOT_LAYOUT
        .iter()
        .flat_map(|(zone, count)| {
            (1..=*count).map(move |number| Slot::new(SlotId { zone: *zone, number }))
        })
        .collect()
}
