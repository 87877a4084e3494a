// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot status and transition rules.
//!
//! Every slot is in exactly one of four states. The graph is fully
//! connected: any status may move to any other status by admin action,
//! but a transition to the current status is rejected as a no-op.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parking slot status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SlotStatus {
    /// Free to book or reserve.
    #[default]
    Available,
    /// Occupied by a confirmed booking.
    Booked,
    /// Held for a reservation.
    Reserved,
    /// Closed for maintenance.
    Maintenance,
}

/// Wire representation for each status.
///
/// Persistence and the API use this table, never the Rust variant names.
const STATUS_TABLE: [(SlotStatus, &str); 4] = [
    (SlotStatus::Available, "AVAILABLE"),
    (SlotStatus::Booked, "BOOKED"),
    (SlotStatus::Reserved, "RESERVED"),
    (SlotStatus::Maintenance, "MAINTENANCE"),
];

impl SlotStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Booked,
        Self::Reserved,
        Self::Maintenance,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => STATUS_TABLE[0].1,
            Self::Booked => STATUS_TABLE[1].1,
            Self::Reserved => STATUS_TABLE[2].1,
            Self::Maintenance => STATUS_TABLE[3].1,
        }
    }

    /// Parses a status from its wire representation (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSlotStatus` if the string is not a known status.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        STATUS_TABLE
            .iter()
            .find(|(_, wire)| wire.eq_ignore_ascii_case(s.trim()))
            .map(|(status, _)| *status)
            .ok_or_else(|| DomainError::InvalidSlotStatus(s.to_string()))
    }

    /// Decodes a stored status, falling back to `Available` for unknown or
    /// missing values.
    #[must_use]
    pub fn from_stored(s: Option<&str>) -> Self {
        s.and_then(|value| Self::parse_str(value).ok())
            .unwrap_or_default()
    }

    /// Returns true if a slot in this status carries a booking record.
    #[must_use]
    pub const fn holds_booking(&self) -> bool {
        matches!(self, Self::Booked | Self::Reserved)
    }

    /// Validates that a transition from this status to `target` is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` when `target` equals the
    /// current status.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if *self == target {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: String::from("slot is already in this status"),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for SlotStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SlotStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}
