// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! These types are distinct from domain types and represent the API contract.

use parkit_audit::AuditEvent;
use parkit_domain::{Booking, BookingForm, Issue, Notification, Profile, Slot};
use serde::{Deserialize, Serialize};

/// The outcome of a mutating API call.
///
/// `notifications` are the records already persisted by the call, in
/// dispatch order, so the caller can relay them to the push service.
#[derive(Debug, Clone)]
pub struct ApiResult<T> {
    /// The response payload.
    pub response: T,
    /// Notifications written by this call.
    pub notifications: Vec<Notification>,
}

impl<T> ApiResult<T> {
    /// Wraps a response that produced no notifications.
    #[must_use]
    pub const fn quiet(response: T) -> Self {
        Self {
            response,
            notifications: Vec::new(),
        }
    }
}

/// A slot together with its active booking, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    #[serde(flatten)]
    pub slot: Slot,
    pub booking: Option<Booking>,
}

/// Request to move a slot to a new status.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeSlotStatusRequest {
    /// Wire status string (`AVAILABLE`, `BOOKED`, `RESERVED`, `MAINTENANCE`).
    pub status: String,
    /// Required when the change creates a booking.
    #[serde(default)]
    pub booking: Option<BookingForm>,
}

/// Response after a slot status change.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSlotStatusResponse {
    pub event_id: i64,
    pub slot: SlotView,
    pub message: String,
}

/// A user's request to reserve a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationSubmission {
    pub slot_id: String,
    pub booking: BookingForm,
}

/// Response after submitting, approving or rejecting a reservation request.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    pub event_id: i64,
    pub request_id: String,
    pub request_status: String,
    pub message: String,
}

/// Request to report a problem with a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportIssueRequest {
    pub slot_id: String,
    /// Issue catalog entry (e.g. `Blocked Slot`, `Other`).
    pub issue_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to move an issue to a new status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIssueStatusRequest {
    /// `Pending`, `In Progress` or `Resolved`.
    pub status: String,
}

/// Response after an issue is reported or updated.
#[derive(Debug, Clone, Serialize)]
pub struct IssueResponse {
    pub event_id: i64,
    pub issue: Issue,
    pub message: String,
}

/// Response after an issue is deleted.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteIssueResponse {
    pub event_id: i64,
    pub issue_id: String,
    pub message: String,
}

/// The notifications visible to a user.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    /// Count of unread entries in `notifications`.
    pub unread: usize,
}

/// Profile fields supplied on create or update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Response carrying a stored profile.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub message: String,
}

/// Request to map a custom user id to a role.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: String,
    /// `admin` or `user`.
    pub role: String,
}

/// Response after a role assignment.
#[derive(Debug, Clone, Serialize)]
pub struct AssignRoleResponse {
    pub event_id: i64,
    pub user_id: String,
    pub role: String,
    pub message: String,
}

/// The audit trail of one slot, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct AuditTimelineResponse {
    pub slot_id: String,
    pub events: Vec<AuditEvent>,
}
