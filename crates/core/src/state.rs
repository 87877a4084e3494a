// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use parkit_audit::{AuditEvent, StateSnapshot};
use parkit_domain::{
    Booking, DomainError, Issue, NotificationDraft, ReservationRequest, Slot, SlotId, SlotStatus,
    seed_slots,
};

use crate::error::CoreError;

/// The writable state of the lot: every slot and the active booking, if any,
/// attached to each slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotState {
    /// Every slot in the lot, keyed by id.
    pub slots: BTreeMap<SlotId, Slot>,
    /// Active bookings, at most one per slot.
    pub bookings: BTreeMap<SlotId, Booking>,
}

impl LotState {
    /// Creates a freshly seeded lot with every slot available.
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_parts(seed_slots(), Vec::new())
    }

    /// Builds a lot state from stored slots and bookings.
    #[must_use]
    pub fn from_parts(slots: Vec<Slot>, bookings: Vec<Booking>) -> Self {
        Self {
            slots: slots.into_iter().map(|s| (s.id.clone(), s)).collect(),
            bookings: bookings
                .into_iter()
                .map(|b| (b.slot_id.clone(), b))
                .collect(),
        }
    }

    /// Looks up a slot.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SlotNotFound` if the slot is not part of the lot.
    pub fn slot(&self, slot_id: &SlotId) -> Result<&Slot, DomainError> {
        self.slots
            .get(slot_id)
            .ok_or_else(|| DomainError::SlotNotFound(slot_id.to_string()))
    }

    /// Returns the booking attached to a slot, if any.
    #[must_use]
    pub fn booking(&self, slot_id: &SlotId) -> Option<&Booking> {
        self.bookings.get(slot_id)
    }

    /// Verifies that bookings and slots agree across the whole lot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InconsistentState` describing the first violation.
    pub fn check_consistency(&self) -> Result<(), CoreError> {
        self.bookings
            .keys()
            .try_for_each(|slot_id| self.check_slot_consistency(slot_id))
    }

    /// Verifies that one slot and its booking agree.
    ///
    /// A booking must belong to an existing slot, its status must equal the
    /// slot's status, and only `BOOKED` or `RESERVED` slots may carry one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InconsistentState` describing the violation.
    pub fn check_slot_consistency(&self, slot_id: &SlotId) -> Result<(), CoreError> {
        let Some(booking) = self.bookings.get(slot_id) else {
            return Ok(());
        };
        let Some(slot) = self.slots.get(slot_id) else {
            return Err(CoreError::InconsistentState(format!(
                "booking for unknown slot {slot_id}"
            )));
        };
        if !slot.status.holds_booking() {
            return Err(CoreError::InconsistentState(format!(
                "slot {slot_id} is {} but carries a booking",
                slot.status
            )));
        }
        if booking.status != slot.status {
            return Err(CoreError::InconsistentState(format!(
                "booking for {slot_id} is {} but slot is {}",
                booking.status, slot.status
            )));
        }
        Ok(())
    }

    /// Converts one slot's view of the state to a snapshot for audit purposes.
    #[must_use]
    pub fn slot_snapshot(&self, slot_id: &SlotId) -> StateSnapshot {
        let status: SlotStatus = self
            .slots
            .get(slot_id)
            .map_or(SlotStatus::Available, |s| s.status);
        let holder: &str = self
            .bookings
            .get(slot_id)
            .map_or("none", |b| b.user_id.as_str());
        StateSnapshot::new(format!("slot={slot_id},status={status},booking={holder}"))
    }
}

impl Default for LotState {
    fn default() -> Self {
        Self::seeded()
    }
}

/// A booking write produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingChange {
    /// Insert or replace the booking for its slot.
    Upsert(Booking),
    /// Remove the booking for a slot.
    Delete(SlotId),
}

/// An issue write produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueChange {
    /// Insert or replace an issue.
    Upsert(Issue),
    /// Remove an issue by id.
    Delete(String),
}

/// A single storage write. A transition's changes are applied in the order
/// they are listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LotChange {
    /// Update a slot's status.
    Slot(Slot),
    /// Write or remove a slot's booking.
    Booking(BookingChange),
    /// Append a confirmed booking to the usage history.
    History(Booking),
    /// Insert or replace a reservation request.
    Request(ReservationRequest),
    /// Write or remove an issue.
    Issue(IssueChange),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: LotState,
    /// Storage writes, in application order.
    pub changes: Vec<LotChange>,
    /// Notifications to dispatch once the changes are persisted.
    pub notifications: Vec<NotificationDraft>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
