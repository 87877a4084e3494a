// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use parkit_domain::{Role, SlotId};

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

fn event_from_row(row: &AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let role: Role = Role::parse_str(&actor_data.role)
        .map_err(|e| PersistenceError::UnreadableRecord(e.to_string()))?;
    let slot_id: Option<SlotId> = row
        .slot_id
        .as_deref()
        .map(SlotId::parse)
        .transpose()
        .map_err(|e| PersistenceError::UnreadableRecord(e.to_string()))?;

    Ok(AuditEvent::new(
        Actor::new(actor_data.id, role),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        slot_id,
    )
    .with_event_id(row.event_id))
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `NotFound` if the event does not exist, or an error if it cannot
/// be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("audit event {event_id}")))?;
    event_from_row(&row)
}

/// Lists the audit timeline of one slot, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn list_for_slot(
    conn: &mut SqliteConnection,
    slot_id: &SlotId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::slot_id.eq(slot_id.to_string()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .iter()
        .map(event_from_row)
        .collect()
}
