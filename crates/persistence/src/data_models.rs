// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain records.
//!
//! Stored columns are mostly nullable. Absent values decode to the domain
//! default rather than failing the whole load.

use diesel::prelude::*;
use parkit_domain::{
    Booking, Issue, IssueStatus, IssueType, Notification, NotificationKind, PriorityTag, Profile,
    RequestStatus, ReservationRequest, Slot, SlotId, SlotStatus, VehicleType, zone_name,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::warn;

use crate::diesel_schema;
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub role: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Formats a timestamp as RFC 3339 for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Encoding(e.to_string()))
}

/// Parses a stored RFC 3339 timestamp. Malformed values decode to `None`.
pub fn parse_timestamp(value: Option<&str>) -> Option<OffsetDateTime> {
    let raw: &str = value?;
    OffsetDateTime::parse(raw, &Rfc3339)
        .inspect_err(|e| warn!(value = raw, error = %e, "Ignoring malformed stored timestamp"))
        .ok()
}

fn parse_date(value: Option<&str>) -> Option<Date> {
    let raw: &str = value?;
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .inspect_err(|e| warn!(value = raw, error = %e, "Ignoring malformed stored date"))
        .ok()
}

fn parse_slot_id(value: &str) -> Result<SlotId, PersistenceError> {
    SlotId::parse(value).map_err(|e| PersistenceError::UnreadableRecord(e.to_string()))
}

/// Generates a row type carrying the shared booking columns, plus any
/// table-specific leading columns, with conversions to and from `Booking`.
macro_rules! booking_row {
    (
        $(#[$meta:meta])*
        $name:ident => $table:ident { $($extra:ident : $extra_ty:ty),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Queryable, Selectable, Insertable)]
        #[diesel(table_name = diesel_schema::$table)]
        #[diesel(check_for_backend(diesel::sqlite::Sqlite))]
        pub struct $name {
            $(pub $extra: $extra_ty,)*
            pub slot_id: String,
            pub zone: Option<String>,
            pub vehicle_number: Option<String>,
            pub vehicle_type: Option<String>,
            pub user_id: Option<String>,
            pub user_name: Option<String>,
            pub contact_number: Option<String>,
            pub priority: Option<String>,
            pub status: Option<String>,
            pub booked_by: Option<String>,
            pub booking_date: Option<String>,
            pub start_time: Option<String>,
            pub end_time: Option<String>,
            pub created_at: Option<String>,
        }

        impl $name {
            /// Builds a row from a booking record.
            ///
            /// # Errors
            ///
            /// Returns an error if a timestamp cannot be formatted.
            pub fn from_booking(
                booking: &Booking
                $(, $extra: $extra_ty)*
            ) -> Result<Self, PersistenceError> {
                Ok(Self {
                    $($extra,)*
                    slot_id: booking.slot_id.to_string(),
                    zone: Some(booking.zone.clone()),
                    vehicle_number: booking.vehicle_number.clone(),
                    vehicle_type: Some(booking.vehicle_type.as_str().to_string()),
                    user_id: Some(booking.user_id.clone()),
                    user_name: Some(booking.user_name.clone()),
                    contact_number: Some(booking.contact_number.clone()),
                    priority: Some(booking.priority.as_str().to_string()),
                    status: Some(booking.status.as_str().to_string()),
                    booked_by: Some(booking.booked_by.clone()),
                    booking_date: booking.booking_date.map(|d| d.to_string()),
                    start_time: booking.start_time.map(format_timestamp).transpose()?,
                    end_time: booking.end_time.map(format_timestamp).transpose()?,
                    created_at: booking.created_at.map(format_timestamp).transpose()?,
                })
            }

            /// Rebuilds the booking record, defaulting absent fields.
            ///
            /// # Errors
            ///
            /// Returns an error if the stored slot id is not part of the lot.
            pub fn to_booking(&self) -> Result<Booking, PersistenceError> {
                let slot_id: SlotId = parse_slot_id(&self.slot_id)?;
                Ok(Booking {
                    zone: self.zone.clone().unwrap_or_else(|| slot_id.zone_code()),
                    vehicle_number: self.vehicle_number.clone(),
                    vehicle_type: VehicleType::from(self.vehicle_type.as_deref().unwrap_or("")),
                    user_id: self.user_id.clone().unwrap_or_default(),
                    user_name: self.user_name.clone().unwrap_or_default(),
                    contact_number: self.contact_number.clone().unwrap_or_default(),
                    priority: self
                        .priority
                        .as_deref()
                        .and_then(|p| PriorityTag::parse_str(p).ok())
                        .unwrap_or(PriorityTag::Normal),
                    status: SlotStatus::from_stored(self.status.as_deref()),
                    booked_by: self.booked_by.clone().unwrap_or_default(),
                    booking_date: parse_date(self.booking_date.as_deref()),
                    start_time: parse_timestamp(self.start_time.as_deref()),
                    end_time: parse_timestamp(self.end_time.as_deref()),
                    created_at: parse_timestamp(self.created_at.as_deref()),
                    slot_id,
                })
            }
        }
    };
}

booking_row! {
    /// An active booking row.
    BookingRow => bookings {}
}

booking_row! {
    /// An append-only history row (the id is assigned by the database).
    HistoryRow => booking_history {}
}

booking_row! {
    /// A reservation request row.
    RequestRow => reservation_requests {
        request_id: String,
        request_status: Option<String>,
    }
}

impl RequestRow {
    /// Builds a row from a reservation request.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be formatted.
    pub fn from_request(request: &ReservationRequest) -> Result<Self, PersistenceError> {
        Self::from_booking(
            &request.booking,
            request.request_id.clone(),
            Some(request.request_status.as_str().to_string()),
        )
    }

    /// Rebuilds the reservation request. An absent status reads as pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored slot id is not part of the lot.
    pub fn to_request(&self) -> Result<ReservationRequest, PersistenceError> {
        Ok(ReservationRequest {
            request_id: self.request_id.clone(),
            booking: self.to_booking()?,
            request_status: self
                .request_status
                .as_deref()
                .and_then(|s| RequestStatus::parse_str(s).ok())
                .unwrap_or(RequestStatus::Pending),
        })
    }
}

/// A slot row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = diesel_schema::slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SlotRow {
    pub slot_id: String,
    pub zone: String,
    pub zone_name: String,
    pub status: Option<String>,
}

impl SlotRow {
    /// Builds a row from a slot.
    #[must_use]
    pub fn from_slot(slot: &Slot) -> Self {
        Self {
            slot_id: slot.id.to_string(),
            zone: slot.zone.clone(),
            zone_name: slot.zone_name.clone(),
            status: Some(slot.status.as_str().to_string()),
        }
    }

    /// Rebuilds the slot. Absent or unknown statuses read as `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored slot id is not part of the lot.
    pub fn to_slot(&self) -> Result<Slot, PersistenceError> {
        let id: SlotId = parse_slot_id(&self.slot_id)?;
        Ok(Slot::new(id).with_status(SlotStatus::from_stored(self.status.as_deref())))
    }
}

/// An issue row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = diesel_schema::issues)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IssueRow {
    pub issue_id: String,
    pub slot_id: String,
    pub zone_name: Option<String>,
    pub issue_type: String,
    pub description: Option<String>,
    pub reported_by: String,
    pub status: Option<String>,
    pub reported_at: Option<String>,
}

impl IssueRow {
    /// Builds a row from an issue.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_issue(issue: &Issue) -> Result<Self, PersistenceError> {
        Ok(Self {
            issue_id: issue.issue_id.clone(),
            slot_id: issue.slot_id.to_string(),
            zone_name: Some(issue.zone_name.clone()),
            issue_type: issue.issue_type.as_str().to_string(),
            description: issue.description.clone(),
            reported_by: issue.reported_by.clone(),
            status: Some(issue.status.as_str().to_string()),
            reported_at: Some(format_timestamp(issue.reported_at)?),
        })
    }

    /// Rebuilds the issue, defaulting absent fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored slot id is not part of the lot.
    pub fn to_issue(&self) -> Result<Issue, PersistenceError> {
        let slot_id: SlotId = parse_slot_id(&self.slot_id)?;
        Ok(Issue {
            issue_id: self.issue_id.clone(),
            zone_name: self
                .zone_name
                .clone()
                .unwrap_or_else(|| zone_name(slot_id.zone())),
            slot_id,
            issue_type: IssueType::parse_str(&self.issue_type).unwrap_or(IssueType::Other),
            description: self.description.clone(),
            reported_by: self.reported_by.clone(),
            status: self
                .status
                .as_deref()
                .and_then(|s| IssueStatus::parse_str(s).ok())
                .unwrap_or(IssueStatus::Pending),
            reported_at: parse_timestamp(self.reported_at.as_deref())
                .unwrap_or(OffsetDateTime::UNIX_EPOCH),
        })
    }
}

/// A notification row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = diesel_schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NotificationRow {
    pub notification_id: String,
    pub title: String,
    pub message: String,
    pub kind: Option<String>,
    pub target_user_id: Option<String>,
    pub is_read: bool,
    pub created_at: String,
}

impl NotificationRow {
    /// Builds a row from a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_notification(notification: &Notification) -> Result<Self, PersistenceError> {
        Ok(Self {
            notification_id: notification.id.clone(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: Some(notification.kind.as_str().to_string()),
            target_user_id: notification.target_user_id.clone(),
            is_read: notification.read,
            created_at: format_timestamp(notification.created_at)?,
        })
    }

    /// Rebuilds the notification. Unknown kinds read as `status_update`.
    #[must_use]
    pub fn to_notification(&self) -> Notification {
        Notification {
            id: self.notification_id.clone(),
            title: self.title.clone(),
            message: self.message.clone(),
            created_at: parse_timestamp(Some(&self.created_at))
                .unwrap_or(OffsetDateTime::UNIX_EPOCH),
            kind: NotificationKind::from_stored(self.kind.as_deref().unwrap_or("")),
            target_user_id: self.target_user_id.clone(),
            read: self.is_read,
        }
    }
}

/// A profile row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = diesel_schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileRow {
    pub profile_id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            profile_id: profile.id.clone(),
            email: profile.email.clone(),
            display_name: profile.display_name.clone(),
            photo_url: profile.photo_url.clone(),
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.profile_id,
            email: row.email,
            display_name: row.display_name,
            photo_url: row.photo_url,
        }
    }
}

/// A user role row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = diesel_schema::user_roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRoleRow {
    pub user_id: String,
    pub role: String,
}

/// A stored audit event row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diesel_schema::audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub slot_id: Option<String>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

/// A new audit event row (the id is assigned by the database).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = diesel_schema::audit_events)]
pub struct NewAuditEventRow {
    pub slot_id: Option<String>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}
