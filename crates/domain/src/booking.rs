// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking form, booking records, and reservation requests.

use crate::error::{DomainError, FieldError};
use crate::layout::SlotId;
use crate::status::SlotStatus;
use crate::tags::{PriorityTag, RequestStatus, VehicleType};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Minimum number of digits in a contact number.
pub const MIN_CONTACT_DIGITS: usize = 10;

/// Raw booking form as entered by the user.
///
/// All fields are kept as strings so that validation can report every
/// problem at once instead of failing on the first parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    pub vehicle_number: String,
    pub vehicle_type: String,
    /// Custom, human-chosen user id (not the auth provider id).
    pub user_id: String,
    pub user_name: String,
    pub contact_number: String,
    /// Booking date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// End time, `HH:MM`.
    pub end_time: String,
    pub priority: String,
}

/// A validated booking form with typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub user_id: String,
    pub user_name: String,
    pub contact_number: String,
    pub booking_date: Date,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub priority: PriorityTag,
}

fn require<'a>(errors: &mut Vec<FieldError>, field: &str, value: &'a str) -> Option<&'a str> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        None
    } else {
        Some(trimmed)
    }
}

fn contact_is_valid(contact: &str) -> bool {
    let body: &str = contact.strip_prefix('+').unwrap_or(contact);
    let only_allowed: bool = body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    let digits: usize = body.chars().filter(char::is_ascii_digit).count();
    only_allowed && digits >= MIN_CONTACT_DIGITS
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_time(value: &str) -> Option<Time> {
    Time::parse(value, format_description!("[hour]:[minute]")).ok()
}

/// Validates a booking form.
///
/// Every field must be non-blank, the contact number must contain at least
/// ten digits, the date and times must parse, and the priority must be a
/// known tag. An end time earlier than the start time is treated as ending
/// on the following day; an end time equal to the start time is rejected.
///
/// # Errors
///
/// Returns `DomainError::InvalidBookingForm` listing every offending field.
pub fn validate_booking_form(form: &BookingForm) -> Result<BookingDetails, DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let vehicle_number = require(&mut errors, "vehicle_number", &form.vehicle_number);
    let vehicle_type = require(&mut errors, "vehicle_type", &form.vehicle_type);
    let user_id = require(&mut errors, "user_id", &form.user_id);
    let user_name = require(&mut errors, "user_name", &form.user_name);

    let contact = require(&mut errors, "contact_number", &form.contact_number);
    if let Some(value) = contact
        && !contact_is_valid(value)
    {
        errors.push(FieldError::new(
            "contact_number",
            "must contain at least 10 digits",
        ));
    }

    let date = require(&mut errors, "date", &form.date).and_then(|value| {
        let parsed = parse_date(value);
        if parsed.is_none() {
            errors.push(FieldError::new("date", "must be formatted as YYYY-MM-DD"));
        }
        parsed
    });
    let start = require(&mut errors, "start_time", &form.start_time).and_then(|value| {
        let parsed = parse_time(value);
        if parsed.is_none() {
            errors.push(FieldError::new("start_time", "must be formatted as HH:MM"));
        }
        parsed
    });
    let end = require(&mut errors, "end_time", &form.end_time).and_then(|value| {
        let parsed = parse_time(value);
        if parsed.is_none() {
            errors.push(FieldError::new("end_time", "must be formatted as HH:MM"));
        }
        parsed
    });
    if let (Some(start), Some(end)) = (start, end)
        && start == end
    {
        errors.push(FieldError::new("end_time", "must differ from start time"));
    }

    let priority = require(&mut errors, "priority", &form.priority).and_then(|value| {
        let parsed = PriorityTag::parse_str(value).ok();
        if parsed.is_none() {
            errors.push(FieldError::new(
                "priority",
                "must be one of Normal, Staff, Student",
            ));
        }
        parsed
    });

    match (
        errors.is_empty(),
        vehicle_number,
        vehicle_type,
        user_id,
        user_name,
        contact,
        date,
        start,
        end,
        priority,
    ) {
        (
            true,
            Some(vehicle_number),
            Some(vehicle_type),
            Some(user_id),
            Some(user_name),
            Some(contact),
            Some(date),
            Some(start),
            Some(end),
            Some(priority),
        ) => {
            let start_time: OffsetDateTime = PrimitiveDateTime::new(date, start).assume_utc();
            let mut end_time: OffsetDateTime = PrimitiveDateTime::new(date, end).assume_utc();
            if end_time < start_time {
                end_time += Duration::days(1);
            }
            Ok(BookingDetails {
                vehicle_number: vehicle_number.to_string(),
                vehicle_type: VehicleType::from(vehicle_type),
                user_id: user_id.to_string(),
                user_name: user_name.to_string(),
                contact_number: contact.to_string(),
                booking_date: date,
                start_time,
                end_time,
                priority,
            })
        }
        _ => Err(DomainError::InvalidBookingForm { fields: errors }),
    }
}

/// The booking record attached to a slot.
///
/// There is at most one booking per slot. Its `status` always mirrors the
/// slot's status. Timestamp fields are optional so that stored records
/// missing them can still be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub slot_id: SlotId,
    pub zone: String,
    pub vehicle_number: Option<String>,
    pub vehicle_type: VehicleType,
    pub user_id: String,
    pub user_name: String,
    pub contact_number: String,
    pub priority: PriorityTag,
    pub status: SlotStatus,
    /// The custom id of whoever created the booking.
    pub booked_by: String,
    #[serde(with = "iso_date::option")]
    pub booking_date: Option<Date>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl Booking {
    /// Creates a booking record from validated form details.
    #[must_use]
    pub fn from_details(
        slot_id: SlotId,
        details: BookingDetails,
        status: SlotStatus,
        booked_by: &str,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            zone: slot_id.zone_code(),
            slot_id,
            vehicle_number: Some(details.vehicle_number),
            vehicle_type: details.vehicle_type,
            user_id: details.user_id,
            user_name: details.user_name,
            contact_number: details.contact_number,
            priority: details.priority,
            status,
            booked_by: booked_by.to_string(),
            booking_date: Some(details.booking_date),
            start_time: Some(details.start_time),
            end_time: Some(details.end_time),
            created_at: Some(created_at),
        }
    }

    /// Returns a copy of this booking with a different status.
    #[must_use]
    pub fn with_status(&self, status: SlotStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// A user's request to reserve a slot, pending admin approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Generated request identifier.
    pub request_id: String,
    /// The booking the request would create.
    #[serde(flatten)]
    pub booking: Booking,
    /// Approval state of the request.
    pub request_status: RequestStatus,
}

impl ReservationRequest {
    /// Returns true while the request awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.request_status == RequestStatus::Pending
    }

    /// Ensures the request can still be approved or rejected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RequestNotPending` if a decision was already made.
    pub fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(DomainError::RequestNotPending {
                request_id: self.request_id.clone(),
                status: self.request_status.as_str().to_string(),
            })
        }
    }

    /// Returns a copy of this request with a different approval state.
    #[must_use]
    pub fn with_request_status(&self, request_status: RequestStatus) -> Self {
        Self {
            request_status,
            ..self.clone()
        }
    }
}
