// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application operations for the ParkIt lot.
//!
//! This crate sits between the HTTP server and the lower layers. It resolves
//! the caller, enforces roles, translates requests into core commands, and
//! persists each transition. It never performs network I/O itself.

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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    approve_reservation, assign_role, change_slot_status, create_profile, delete_issue,
    ensure_bootstrap_admin, generate_id, get_profile, get_slot, get_slot_audit, get_usage_summary,
    list_active_bookings, list_booking_history, list_issues, list_notifications,
    list_reservations, list_slots, mark_notification_read, reject_reservation, report_issue,
    submit_reservation, update_issue_status, update_profile,
};
pub use request_response::{
    ApiResult, AssignRoleRequest, AssignRoleResponse, AuditTimelineResponse,
    ChangeSlotStatusRequest, ChangeSlotStatusResponse, DeleteIssueResponse, IssueResponse,
    NotificationListResponse, ProfileRequest, ProfileResponse, ReportIssueRequest,
    ReservationResponse, ReservationSubmission, SlotView, UpdateIssueStatusRequest,
};
