// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkit_audit::{Actor, Cause};
use parkit_domain::{BookingForm, Role, SlotId, SlotStatus};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{Command, LotState, TransitionResult, apply};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin01"), Role::Admin)
}

pub fn create_test_user() -> Actor {
    Actor::new(String::from("driver42"), Role::User)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin console"))
}

pub const fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 09:15 UTC)
}

pub fn slot(id: &str) -> SlotId {
    SlotId::parse(id).unwrap()
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

/// Applies a status change as the test admin and unwraps the result.
pub fn change_status(
    state: &LotState,
    id: &str,
    target: SlotStatus,
    form: Option<BookingForm>,
) -> TransitionResult {
    apply(
        state,
        Command::ChangeSlotStatus {
            slot_id: slot(id),
            target,
            form,
        },
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}
