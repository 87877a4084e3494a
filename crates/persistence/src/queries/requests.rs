// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_domain::{RequestStatus, ReservationRequest};

use crate::data_models::RequestRow;
use crate::diesel_schema::reservation_requests;
use crate::error::PersistenceError;

/// Retrieves a reservation request by id.
///
/// # Errors
///
/// Returns `NotFound` if no such request exists.
pub fn get_request(
    conn: &mut SqliteConnection,
    request_id: &str,
) -> Result<ReservationRequest, PersistenceError> {
    let row: RequestRow = reservation_requests::table
        .filter(reservation_requests::request_id.eq(request_id))
        .select(RequestRow::as_select())
        .first::<RequestRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("reservation request {request_id}")))?;
    row.to_request()
}

/// Lists reservation requests, newest first, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests(
    conn: &mut SqliteConnection,
    status: Option<RequestStatus>,
) -> Result<Vec<ReservationRequest>, PersistenceError> {
    let mut query = reservation_requests::table
        .select(RequestRow::as_select())
        .order((
            reservation_requests::created_at.desc(),
            reservation_requests::request_id.asc(),
        ))
        .into_boxed();
    if let Some(status) = status {
        query = query.filter(reservation_requests::request_status.eq(status.as_str()));
    }
    query
        .load::<RequestRow>(conn)?
        .iter()
        .map(RequestRow::to_request)
        .collect()
}
