// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use parkit_domain::{Role, SlotId};
use serde::{Deserialize, Serialize};

/// The caller on whose behalf a lot operation ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The caller's custom user id.
    pub id: String,
    /// The caller's resolved role.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if this actor is a lot administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Why an operation was initiated (request id and a short description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The operation that was performed (e.g., `ChangeSlotStatus`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact description of the affected slot before or after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable record of one successful lot operation.
///
/// Every command that changes stored state produces exactly one audit
/// event, written in the same transaction as the change itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned by the store once persisted.
    pub event_id: Option<i64>,
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    /// The slot the operation touched, if any.
    pub slot_id: Option<SlotId>,
}

impl AuditEvent {
    /// Creates a new, not yet persisted, `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        slot_id: Option<SlotId>,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            slot_id,
        }
    }

    /// Returns a copy of this event carrying its persisted id.
    #[must_use]
    pub fn with_event_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_event(slot: Option<SlotId>) -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("admin01"), Role::Admin),
            Cause::new(String::from("req-1"), String::from("Admin console")),
            Action::new(
                String::from("ChangeSlotStatus"),
                Some(String::from("A1: AVAILABLE -> MAINTENANCE")),
            ),
            StateSnapshot::new(String::from("slot=A1,status=AVAILABLE")),
            StateSnapshot::new(String::from("slot=A1,status=MAINTENANCE")),
            slot,
        )
    }

    #[test]
    fn test_new_event_is_unpersisted() {
        let event: AuditEvent = create_test_event(None);
        assert_eq!(event.event_id, None);
        assert_eq!(event.with_event_id(7).event_id, Some(7));
    }

    #[test]
    fn test_actor_role_checks() {
        assert!(Actor::new(String::from("a"), Role::Admin).is_admin());
        assert!(!Actor::new(String::from("u"), Role::User).is_admin());
    }

    #[test]
    fn test_event_keeps_slot_scope() {
        let slot: SlotId = SlotId::parse("A1").unwrap();
        let event: AuditEvent = create_test_event(Some(slot.clone()));
        assert_eq!(event.slot_id, Some(slot));
        assert_eq!(event.before.data, "slot=A1,status=AVAILABLE");
    }

    #[test]
    fn test_event_serializes_role_and_slot_as_wire_strings() {
        let event: AuditEvent = create_test_event(SlotId::parse("A1").ok());
        let json: String = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
        assert!(json.contains("\"slot_id\":\"A1\""));
    }
}
