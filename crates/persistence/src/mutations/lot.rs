// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit::{BookingChange, IssueChange, LotChange};
use parkit_domain::{Booking, Issue, ReservationRequest, Slot, SlotId};
use tracing::debug;

use crate::data_models::{BookingRow, HistoryRow, IssueRow, RequestRow, SlotRow};
use crate::diesel_schema::{booking_history, bookings, issues, reservation_requests, slots};
use crate::error::PersistenceError;

/// Inserts every given slot.
///
/// # Errors
///
/// Returns an error if any insert fails (for example a duplicate slot id).
pub fn seed_slots(conn: &mut SqliteConnection, seed: &[Slot]) -> Result<usize, PersistenceError> {
    let mut inserted: usize = 0;
    for slot in seed {
        inserted += diesel::insert_into(slots::table)
            .values(SlotRow::from_slot(slot))
            .execute(conn)?;
    }
    Ok(inserted)
}

/// Writes a slot's status. The slot must already exist.
///
/// # Errors
///
/// Returns `NotFound` if no such slot exists.
pub fn update_slot(conn: &mut SqliteConnection, slot: &Slot) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(slots::table.filter(slots::slot_id.eq(slot.id.to_string())))
            .set(slots::status.eq(Some(slot.status.as_str())))
            .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("slot {}", slot.id)));
    }
    Ok(())
}

/// Inserts or replaces the active booking for a slot.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_booking(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    diesel::replace_into(bookings::table)
        .values(BookingRow::from_booking(booking)?)
        .execute(conn)?;
    Ok(())
}

/// Removes the active booking for a slot, if any.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_booking(
    conn: &mut SqliteConnection,
    slot_id: &SlotId,
) -> Result<(), PersistenceError> {
    diesel::delete(bookings::table.filter(bookings::slot_id.eq(slot_id.to_string())))
        .execute(conn)?;
    Ok(())
}

/// Appends a confirmed booking to the history table.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_history(
    conn: &mut SqliteConnection,
    booking: &Booking,
) -> Result<(), PersistenceError> {
    diesel::insert_into(booking_history::table)
        .values(HistoryRow::from_booking(booking)?)
        .execute(conn)?;
    Ok(())
}

/// Inserts or replaces a reservation request.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_request(
    conn: &mut SqliteConnection,
    request: &ReservationRequest,
) -> Result<(), PersistenceError> {
    diesel::replace_into(reservation_requests::table)
        .values(RequestRow::from_request(request)?)
        .execute(conn)?;
    Ok(())
}

/// Inserts or replaces an issue.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_issue(conn: &mut SqliteConnection, issue: &Issue) -> Result<(), PersistenceError> {
    diesel::replace_into(issues::table)
        .values(IssueRow::from_issue(issue)?)
        .execute(conn)?;
    Ok(())
}

/// Deletes an issue.
///
/// # Errors
///
/// Returns `NotFound` if no such issue exists.
pub fn delete_issue(conn: &mut SqliteConnection, issue_id: &str) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(issues::table.filter(issues::issue_id.eq(issue_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("issue {issue_id}")));
    }
    Ok(())
}

/// Applies a single storage change.
///
/// # Errors
///
/// Returns an error if the underlying write fails.
pub fn apply_change(
    conn: &mut SqliteConnection,
    change: &LotChange,
) -> Result<(), PersistenceError> {
    match change {
        LotChange::Slot(slot) => {
            debug!(slot_id = %slot.id, status = %slot.status, "Writing slot status");
            update_slot(conn, slot)
        }
        LotChange::Booking(BookingChange::Upsert(booking)) => upsert_booking(conn, booking),
        LotChange::Booking(BookingChange::Delete(slot_id)) => delete_booking(conn, slot_id),
        LotChange::History(booking) => append_history(conn, booking),
        LotChange::Request(request) => upsert_request(conn, request),
        LotChange::Issue(IssueChange::Upsert(issue)) => upsert_issue(conn, issue),
        LotChange::Issue(IssueChange::Delete(issue_id)) => delete_issue(conn, issue_id),
    }
}
