// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for API tests.

use parkit_audit::Cause;
use parkit_domain::{BookingForm, Role};
use parkit_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::request_response::{ChangeSlotStatusRequest, ReservationSubmission};
use crate::{AuthenticatedActor, ChangeSlotStatusResponse, change_slot_status};

/// Opens a seeded in-memory lot with one admin and two drivers registered.
pub fn setup() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_slots_if_empty().unwrap();
    persistence.set_user_role("admin01", Role::Admin).unwrap();
    persistence.set_user_role("driver42", Role::User).unwrap();
    persistence.set_user_role("driver77", Role::User).unwrap();
    persistence
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin01"), Role::Admin)
}

pub fn driver() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("driver42"), Role::User)
}

pub fn other_driver() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("driver77"), Role::User)
}

pub fn cause() -> Cause {
    Cause::new(String::from("api-test"), String::from("API test"))
}

pub const fn now() -> OffsetDateTime {
    datetime!(2026-03-02 09:15 UTC)
}

pub fn form(user_id: &str) -> BookingForm {
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

pub fn status_request(status: &str, booking: Option<BookingForm>) -> ChangeSlotStatusRequest {
    ChangeSlotStatusRequest {
        status: status.to_string(),
        booking,
    }
}

pub fn submission(slot_id: &str, user_id: &str) -> ReservationSubmission {
    ReservationSubmission {
        slot_id: slot_id.to_string(),
        booking: form(user_id),
    }
}

/// Books a slot for `user_id` as the admin.
pub fn book(
    persistence: &mut Persistence,
    slot_id: &str,
    user_id: &str,
) -> ChangeSlotStatusResponse {
    change_slot_status(
        persistence,
        slot_id,
        status_request("BOOKED", Some(form(user_id))),
        &admin(),
        cause(),
        now(),
    )
    .unwrap()
    .response
}
