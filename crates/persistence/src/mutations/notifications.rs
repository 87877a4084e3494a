// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_domain::Notification;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Inserts a notification record. Every dispatch is a new row.
///
/// # Errors
///
/// Returns an error if the insert fails (including a reused id).
pub fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &Notification,
) -> Result<(), PersistenceError> {
    diesel::insert_into(notifications::table)
        .values(NotificationRow::from_notification(notification)?)
        .execute(conn)?;
    Ok(())
}

/// Sets the read flag on a notification. Marking twice is harmless.
///
/// # Errors
///
/// Returns `NotFound` if no such notification exists.
pub fn mark_notification_read(
    conn: &mut SqliteConnection,
    notification_id: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        notifications::table.filter(notifications::notification_id.eq(notification_id)),
    )
    .set(notifications::is_read.eq(true))
    .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "notification {notification_id}"
        )));
    }
    Ok(())
}
