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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod booking;
mod error;
mod issue;
mod layout;
mod notification;
mod profile;
mod status;
mod tags;

#[cfg(test)]
mod tests;

// Re-export public types
pub use booking::{
    Booking, BookingDetails, BookingForm, MIN_CONTACT_DIGITS, ReservationRequest,
    validate_booking_form,
};
pub use error::{DomainError, FieldError};
pub use issue::{Issue, IssueType};
pub use layout::{LOT_LAYOUT, Slot, SlotId, seed_slots, total_slots, zone_capacity, zone_name};
pub use notification::{Audience, Notification, NotificationDraft, NotificationKind};
pub use profile::{Profile, validate_profile};
pub use status::SlotStatus;
pub use tags::{IssueStatus, PriorityTag, RequestStatus, Role, VehicleType};
