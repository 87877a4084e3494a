// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Whole-transition persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit::{LotChange, TransitionResult};
use parkit_domain::Notification;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::lot::apply_change;
use crate::mutations::notifications::insert_notification;

/// Persists a transition result in a single transaction.
///
/// Writes happen in a fixed order: the storage changes in the order the
/// transition listed them, then the notification records, then the audit
/// event. If any write fails nothing is committed.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition to persist
/// * `notifications` - Notification records materialized from the transition's drafts
/// * `recorded_at` - Timestamp for the audit event
///
/// # Returns
///
/// The event ID of the persisted audit event.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    notifications: &[Notification],
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        for change in &result.changes {
            apply_change(conn, change)?;
        }
        for notification in notifications {
            insert_notification(conn, notification)?;
        }
        let event_id: i64 = persist_audit_event(conn, &result.audit_event, recorded_at)?;

        debug!(
            changes = result.changes.len(),
            history = result
                .changes
                .iter()
                .filter(|c| matches!(c, LotChange::History(_)))
                .count(),
            notifications = notifications.len(),
            "Transition writes applied"
        );
        info!(
            event_id,
            action = %result.audit_event.action.name,
            actor_id = %result.audit_event.actor.id,
            "Persisted transition"
        );
        Ok(event_id)
    })
}
