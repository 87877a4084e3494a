// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit::LotState;
use parkit_domain::{Booking, Slot, SlotId, SlotStatus};
use tracing::{debug, warn};

use crate::data_models::{BookingRow, HistoryRow, SlotRow};
use crate::diesel_schema::{booking_history, bookings, slots};
use crate::error::PersistenceError;

/// Counts stored slots.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_slots(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(slots::table.count().get_result(conn)?)
}

/// Lists every slot ordered by id text.
///
/// # Errors
///
/// Returns an error if the query fails or a stored slot id is invalid.
pub fn list_slots(conn: &mut SqliteConnection) -> Result<Vec<Slot>, PersistenceError> {
    slots::table
        .order(slots::slot_id.asc())
        .select(SlotRow::as_select())
        .load::<SlotRow>(conn)?
        .iter()
        .map(SlotRow::to_slot)
        .collect()
}

/// Lists active bookings in lot layout order, with the same defaulting as
/// [`load_lot_state`].
///
/// # Errors
///
/// Returns an error if a query fails or a stored slot id is invalid.
pub fn list_bookings(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    Ok(load_lot_state(conn)?.bookings.into_values().collect())
}

/// Lists the booking history in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored slot id is invalid.
pub fn list_history(conn: &mut SqliteConnection) -> Result<Vec<Booking>, PersistenceError> {
    booking_history::table
        .order(booking_history::history_id.asc())
        .select(HistoryRow::as_select())
        .load::<HistoryRow>(conn)?
        .iter()
        .map(HistoryRow::to_booking)
        .collect()
}

/// Loads the slot registry and active bookings as one lot state.
///
/// A booking row whose status is absent or unknown takes its slot's status.
/// A booking row attached to a slot that cannot hold one is skipped.
///
/// # Errors
///
/// Returns an error if either query fails or a stored slot id is invalid.
pub fn load_lot_state(conn: &mut SqliteConnection) -> Result<LotState, PersistenceError> {
    let slot_list: Vec<Slot> = list_slots(conn)?;
    let slot_statuses: BTreeMap<SlotId, SlotStatus> =
        slot_list.iter().map(|s| (s.id.clone(), s.status)).collect();

    let rows: Vec<BookingRow> = bookings::table
        .order(bookings::slot_id.asc())
        .select(BookingRow::as_select())
        .load::<BookingRow>(conn)?;

    let mut booking_list: Vec<Booking> = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut booking: Booking = row.to_booking()?;
        let slot_status: SlotStatus = slot_statuses
            .get(&booking.slot_id)
            .copied()
            .unwrap_or(SlotStatus::Available);
        if !slot_status.holds_booking() {
            warn!(
                slot_id = %booking.slot_id,
                slot_status = %slot_status,
                "Skipping stored booking for a slot that holds none"
            );
            continue;
        }
        let stored: Option<SlotStatus> = row
            .status
            .as_deref()
            .and_then(|value| SlotStatus::parse_str(value).ok());
        if stored.is_none() {
            debug!(slot_id = %booking.slot_id, "Defaulting booking status to slot status");
            booking.status = slot_status;
        }
        booking_list.push(booking);
    }

    Ok(LotState::from_parts(slot_list, booking_list))
}
