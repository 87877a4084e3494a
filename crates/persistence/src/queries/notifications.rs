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

/// Lists the notifications a user sees: those targeted at them plus
/// broadcasts, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<Notification>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(
            notifications::target_user_id
                .eq(user_id)
                .or(notifications::target_user_id.is_null()),
        )
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.asc(),
        ))
        .select(NotificationRow::as_select())
        .load::<NotificationRow>(conn)?;
    Ok(rows.iter().map(NotificationRow::to_notification).collect())
}

/// Retrieves a notification by id.
///
/// # Errors
///
/// Returns `NotFound` if no such notification exists.
pub fn get_notification(
    conn: &mut SqliteConnection,
    notification_id: &str,
) -> Result<Notification, PersistenceError> {
    notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .select(NotificationRow::as_select())
        .first::<NotificationRow>(conn)
        .optional()?
        .as_ref()
        .map(NotificationRow::to_notification)
        .ok_or_else(|| PersistenceError::NotFound(format!("notification {notification_id}")))
}
