// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_audit::AuditEvent;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{
    ActionData, ActorData, CauseData, NewAuditEventRow, StateSnapshotData, format_timestamp,
};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
/// * `recorded_at` - When the event was recorded
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    recorded_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        role: event.actor.role.as_str().to_string(),
    };
    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };
    let before_data: StateSnapshotData = StateSnapshotData {
        data: event.before.data.clone(),
    };
    let after_data: StateSnapshotData = StateSnapshotData {
        data: event.after.data.clone(),
    };

    let row: NewAuditEventRow = NewAuditEventRow {
        slot_id: event.slot_id.as_ref().map(ToString::to_string),
        actor_json: serde_json::to_string(&actor_data)?,
        cause_json: serde_json::to_string(&cause_data)?,
        action_json: serde_json::to_string(&action_data)?,
        before_snapshot_json: serde_json::to_string(&before_data)?,
        after_snapshot_json: serde_json::to_string(&after_data)?,
        created_at: Some(format_timestamp(recorded_at)?),
    };

    diesel::insert_into(audit_events::table)
        .values(&row)
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
