// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod request_tests;

use parkit::{Command, LotState, TransitionResult, apply};
use parkit_audit::{Actor, Cause};
use parkit_domain::{BookingForm, Notification, Role, SlotId};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin01"), Role::Admin)
}

pub fn create_test_user() -> Actor {
    Actor::new(String::from("driver42"), Role::User)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub const fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:15 UTC)
}

pub fn slot(id: &str) -> SlotId {
    SlotId::parse(id).expect("Valid slot id")
}

pub fn create_test_form(user_id: &str) -> BookingForm {
    BookingForm {
        vehicle_number: String::from("KA01AB1234"),
        vehicle_type: String::from("Car"),
        user_id: user_id.to_string(),
        user_name: String::from("Asha Rao"),
        contact_number: String::from("9876543210"),
        date: String::from("2026-03-02"),
        start_time: String::from("10:00"),
        end_time: String::from("12:00"),
        priority: String::from("Normal"),
    }
}

/// Opens a fresh in-memory database with the lot seeded.
pub fn seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_slots_if_empty().unwrap();
    persistence
}

/// Turns a transition's drafts into records with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn materialize(
    result: &TransitionResult,
    prefix: &str,
    at: OffsetDateTime,
) -> Vec<Notification> {
    result
        .notifications
        .iter()
        .enumerate()
        .map(|(i, draft)| Notification::from_draft(format!("{prefix}-{i}"), draft, at))
        .collect()
}

/// Applies a command against the stored state and persists the outcome.
pub fn run(
    persistence: &mut Persistence,
    command: Command,
    actor: Actor,
    prefix: &str,
    at: OffsetDateTime,
) -> TransitionResult {
    let state: LotState = persistence.load_lot_state().unwrap();
    let result: TransitionResult = apply(&state, command, actor, create_test_cause(), at).unwrap();
    let notifications: Vec<Notification> = materialize(&result, prefix, at);
    persistence
        .persist_transition(&result, &notifications, at)
        .unwrap();
    result
}
