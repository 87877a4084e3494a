// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: authorize, parse the
//! request into domain types, load the current lot state, run the pure core
//! transition, then persist the whole outcome in one transaction. The
//! returned notifications are already stored; relaying them is the caller's
//! job.

use parkit::{Command, IssueChange, LotChange, LotState, TransitionResult, apply};
use parkit_analytics::UsageSummary;
use parkit_audit::{Action, AuditEvent, Cause, StateSnapshot};
use parkit_domain::{
    Booking, Issue, IssueStatus, IssueType, Notification, Profile, RequestStatus,
    ReservationRequest, Role, Slot, SlotId, SlotStatus,
};
use parkit_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ApiResult, AssignRoleRequest, AssignRoleResponse, AuditTimelineResponse,
    ChangeSlotStatusRequest, ChangeSlotStatusResponse, DeleteIssueResponse, IssueResponse,
    NotificationListResponse, ProfileRequest, ProfileResponse, ReportIssueRequest,
    ReservationResponse, ReservationSubmission, SlotView, UpdateIssueStatusRequest,
};

/// Generates a record identifier of the form `{prefix}_{nanos}_{random}`.
///
/// Identifiers sort roughly by creation time and are unique across
/// concurrent requests.
#[must_use]
pub fn generate_id(prefix: &str, now: OffsetDateTime) -> String {
    format!(
        "{prefix}_{}_{:016x}",
        now.unix_timestamp_nanos(),
        rand::random::<u64>()
    )
}

/// A persisted transition.
struct Executed {
    event_id: i64,
    result: TransitionResult,
    notifications: Vec<Notification>,
}

/// Runs a command against the current stored state and persists the outcome.
fn execute(
    persistence: &mut Persistence,
    command: Command,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<Executed, ApiError> {
    let state: LotState = persistence.load_lot_state().map_err(internal)?;

    let result: TransitionResult = apply(&state, command, actor.to_audit_actor(), cause, now)
        .map_err(translate_core_error)?;

    let notifications: Vec<Notification> = result
        .notifications
        .iter()
        .map(|draft| Notification::from_draft(generate_id("ntf", now), draft, now))
        .collect();

    let event_id: i64 = persistence
        .persist_transition(&result, &notifications, now)
        .map_err(internal)?;

    debug!(
        event_id,
        actor_id = %actor.id,
        action = %result.audit_event.action.name,
        notifications = notifications.len(),
        "Persisted transition"
    );

    Ok(Executed {
        event_id,
        result,
        notifications,
    })
}

fn internal(err: PersistenceError) -> ApiError {
    ApiError::Internal {
        message: err.to_string(),
    }
}

fn parse_slot_id(slot_id: &str) -> Result<SlotId, ApiError> {
    SlotId::parse(slot_id).map_err(translate_domain_error)
}

fn slot_view(state: &LotState, slot_id: &SlotId) -> Result<SlotView, ApiError> {
    let slot: Slot = state.slot(slot_id).map_err(translate_domain_error)?.clone();
    Ok(SlotView {
        slot,
        booking: state.booking(slot_id).cloned(),
    })
}

fn written_request(result: &TransitionResult) -> Option<&ReservationRequest> {
    result.changes.iter().find_map(|change| match change {
        LotChange::Request(request) => Some(request),
        _ => None,
    })
}

fn written_issue(result: &TransitionResult) -> Option<&Issue> {
    result.changes.iter().find_map(|change| match change {
        LotChange::Issue(IssueChange::Upsert(issue)) => Some(issue),
        _ => None,
    })
}

// ============================================================================
// Slots and bookings
// ============================================================================

/// Lists every slot, ordered by slot id, with its active booking.
///
/// # Errors
///
/// Returns an error if the lot cannot be loaded.
pub fn list_slots(persistence: &mut Persistence) -> Result<Vec<SlotView>, ApiError> {
    let state: LotState = persistence.load_lot_state().map_err(internal)?;
    Ok(state
        .slots
        .values()
        .map(|slot| SlotView {
            slot: slot.clone(),
            booking: state.booking(&slot.id).cloned(),
        })
        .collect())
}

/// Returns one slot with its active booking.
///
/// # Errors
///
/// Returns an error if the slot id is not part of the lot.
pub fn get_slot(persistence: &mut Persistence, slot_id: &str) -> Result<SlotView, ApiError> {
    let slot_id: SlotId = parse_slot_id(slot_id)?;
    let state: LotState = persistence.load_lot_state().map_err(internal)?;
    slot_view(&state, &slot_id)
}

/// Moves a slot to a new status.
///
/// Only admins may change slot status directly. Moving a slot to `BOOKED`
/// notifies the booking's user, and moving it to `MAINTENANCE` broadcasts
/// to everyone.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The slot id or status is unknown
/// - The transition is not allowed from the slot's current status
/// - A required booking form is missing or invalid
pub fn change_slot_status(
    persistence: &mut Persistence,
    slot_id: &str,
    request: ChangeSlotStatusRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ChangeSlotStatusResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "change_slot_status")?;

    let slot_id: SlotId = parse_slot_id(slot_id)?;
    let target: SlotStatus =
        SlotStatus::parse_str(&request.status).map_err(translate_domain_error)?;

    let command: Command = Command::ChangeSlotStatus {
        slot_id: slot_id.clone(),
        target,
        form: request.booking,
    };
    let executed: Executed = execute(persistence, command, actor, cause, now)?;
    let slot: SlotView = slot_view(&executed.result.new_state, &slot_id)?;

    info!(slot_id = %slot_id, status = %target, actor_id = %actor.id, "Slot status changed");

    Ok(ApiResult {
        response: ChangeSlotStatusResponse {
            event_id: executed.event_id,
            slot,
            message: format!("Slot {slot_id} is now {target}"),
        },
        notifications: executed.notifications,
    })
}

/// Lists the active bookings, one per occupied slot.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the read fails.
pub fn list_active_bookings(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<Booking>, ApiError> {
    AuthorizationService::require_admin(actor, "list_active_bookings")?;
    persistence.list_active_bookings().map_err(internal)
}

/// Lists every confirmed booking ever made, oldest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the read fails.
pub fn list_booking_history(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<Booking>, ApiError> {
    AuthorizationService::require_admin(actor, "list_booking_history")?;
    persistence.list_booking_history().map_err(internal)
}

// ============================================================================
// Reservation requests
// ============================================================================

/// Submits a request to reserve an available slot.
///
/// Users may only submit requests in their own name; admins may submit on
/// behalf of anyone.
///
/// # Errors
///
/// Returns an error if:
/// - A non-admin names another user in the booking form
/// - The slot id is unknown or the slot is not available
/// - The booking form is invalid
pub fn submit_reservation(
    persistence: &mut Persistence,
    request: ReservationSubmission,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ReservationResponse>, ApiError> {
    // Blank ids are left for form validation to report
    let owner: &str = request.booking.user_id.trim();
    if !owner.is_empty() {
        AuthorizationService::require_self_or_admin(actor, owner, "reserve_for_other_user")?;
    }

    let slot_id: SlotId = parse_slot_id(&request.slot_id)?;
    let request_id: String = generate_id("req", now);

    let command: Command = Command::SubmitReservationRequest {
        slot_id: slot_id.clone(),
        form: request.booking,
        request_id: request_id.clone(),
    };
    let executed: Executed = execute(persistence, command, actor, cause, now)?;

    info!(request_id, slot_id = %slot_id, actor_id = %actor.id, "Reservation requested");

    Ok(ApiResult {
        response: ReservationResponse {
            event_id: executed.event_id,
            request_id,
            request_status: RequestStatus::Pending.as_str().to_string(),
            message: format!("Reservation request for slot {slot_id} submitted"),
        },
        notifications: executed.notifications,
    })
}

/// Lists reservation requests, newest first.
///
/// Admins see every request; other users see only their own.
///
/// # Errors
///
/// Returns an error if the status filter is unknown or the read fails.
pub fn list_reservations(
    persistence: &mut Persistence,
    status: Option<&str>,
    actor: &AuthenticatedActor,
) -> Result<Vec<ReservationRequest>, ApiError> {
    let status: Option<RequestStatus> = status
        .map(RequestStatus::parse_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let requests: Vec<ReservationRequest> = persistence
        .list_reservation_requests(status)
        .map_err(internal)?;

    if actor.is_admin() {
        return Ok(requests);
    }
    Ok(requests
        .into_iter()
        .filter(|r| r.booking.user_id == actor.id)
        .collect())
}

fn decide_reservation(
    persistence: &mut Persistence,
    request_id: &str,
    approve: bool,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ReservationResponse>, ApiError> {
    let request: ReservationRequest = persistence
        .get_reservation_request(request_id)
        .map_err(|e| translate_persistence_error(e, "ReservationRequest"))?;
    let slot_id: SlotId = request.booking.slot_id.clone();

    let command: Command = if approve {
        Command::ApproveReservationRequest { request }
    } else {
        Command::RejectReservationRequest { request }
    };
    let executed: Executed = execute(persistence, command, actor, cause, now)?;

    let status: RequestStatus = written_request(&executed.result)
        .map(|r| r.request_status)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Decision on request {request_id} wrote no request record"),
        })?;

    info!(
        request_id,
        slot_id = %slot_id,
        status = %status,
        actor_id = %actor.id,
        "Reservation decided"
    );

    Ok(ApiResult {
        response: ReservationResponse {
            event_id: executed.event_id,
            request_id: request_id.to_string(),
            request_status: status.as_str().to_string(),
            message: format!("Reservation request for slot {slot_id} {status}"),
        },
        notifications: executed.notifications,
    })
}

/// Approves a pending reservation request and reserves its slot.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - The request does not exist or was already decided
/// - The slot has since been taken by someone else
pub fn approve_reservation(
    persistence: &mut Persistence,
    request_id: &str,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ReservationResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "approve_reservation")?;
    decide_reservation(persistence, request_id, true, actor, cause, now)
}

/// Rejects a pending reservation request.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, or the request does not
/// exist or was already decided.
pub fn reject_reservation(
    persistence: &mut Persistence,
    request_id: &str,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ReservationResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "reject_reservation")?;
    decide_reservation(persistence, request_id, false, actor, cause, now)
}

// ============================================================================
// Issues
// ============================================================================

/// Reports a problem with a slot. Any authenticated user may report.
///
/// # Errors
///
/// Returns an error if the slot id or issue type is unknown, or if the issue
/// type is `Other` and no description was given.
pub fn report_issue(
    persistence: &mut Persistence,
    request: ReportIssueRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<IssueResponse>, ApiError> {
    let slot_id: SlotId = parse_slot_id(&request.slot_id)?;
    let issue_type: IssueType =
        IssueType::parse_str(&request.issue_type).map_err(translate_domain_error)?;

    let command: Command = Command::ReportIssue {
        issue_id: generate_id("iss", now),
        slot_id,
        issue_type,
        description: request.description,
    };
    let executed: Executed = execute(persistence, command, actor, cause, now)?;
    let issue: Issue = issued(&executed)?;

    info!(
        issue_id = %issue.issue_id,
        slot_id = %issue.slot_id,
        actor_id = %actor.id,
        "Issue reported"
    );

    Ok(ApiResult {
        response: IssueResponse {
            event_id: executed.event_id,
            message: format!("Issue reported for slot {}", issue.slot_id),
            issue,
        },
        notifications: executed.notifications,
    })
}

fn issued(executed: &Executed) -> Result<Issue, ApiError> {
    written_issue(&executed.result)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Issue transition wrote no issue record"),
        })
}

/// Lists reported issues, newest first.
///
/// Admins see every issue; other users see only the ones they reported.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_issues(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<Issue>, ApiError> {
    let issues: Vec<Issue> = persistence.list_issues().map_err(internal)?;
    if actor.is_admin() {
        return Ok(issues);
    }
    Ok(issues
        .into_iter()
        .filter(|i| i.reported_by == actor.id)
        .collect())
}

/// Moves an issue to a new status and notifies its reporter.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the status is unknown, or
/// the issue does not exist.
pub fn update_issue_status(
    persistence: &mut Persistence,
    issue_id: &str,
    request: &UpdateIssueStatusRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<IssueResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "update_issue_status")?;

    let status: IssueStatus =
        IssueStatus::parse_str(&request.status).map_err(translate_domain_error)?;
    let issue: Issue = persistence
        .get_issue(issue_id)
        .map_err(|e| translate_persistence_error(e, "Issue"))?;

    let executed: Executed = execute(
        persistence,
        Command::UpdateIssueStatus { issue, status },
        actor,
        cause,
        now,
    )?;
    let issue: Issue = issued(&executed)?;

    info!(issue_id, status = %status, actor_id = %actor.id, "Issue status updated");

    Ok(ApiResult {
        response: IssueResponse {
            event_id: executed.event_id,
            message: format!("Issue {issue_id} is now {status}"),
            issue,
        },
        notifications: executed.notifications,
    })
}

/// Deletes a reported issue.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the issue does not exist.
pub fn delete_issue(
    persistence: &mut Persistence,
    issue_id: &str,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<DeleteIssueResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "delete_issue")?;

    let issue: Issue = persistence
        .get_issue(issue_id)
        .map_err(|e| translate_persistence_error(e, "Issue"))?;
    let executed: Executed =
        execute(persistence, Command::DeleteIssue { issue }, actor, cause, now)?;

    info!(issue_id, actor_id = %actor.id, "Issue deleted");

    Ok(ApiResult {
        response: DeleteIssueResponse {
            event_id: executed.event_id,
            issue_id: issue_id.to_string(),
            message: format!("Issue {issue_id} deleted"),
        },
        notifications: executed.notifications,
    })
}

// ============================================================================
// Notifications
// ============================================================================

/// Lists the notifications addressed to the actor plus every broadcast,
/// newest first.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_notifications(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<NotificationListResponse, ApiError> {
    let notifications: Vec<Notification> = persistence
        .list_notifications_for_user(&actor.id)
        .map_err(internal)?;
    let unread: usize = notifications.iter().filter(|n| !n.read).count();
    Ok(NotificationListResponse {
        notifications,
        unread,
    })
}

/// Marks a notification as read.
///
/// A notification addressed to someone else is reported as not found.
///
/// # Errors
///
/// Returns an error if the notification does not exist or is not visible to
/// the actor.
pub fn mark_notification_read(
    persistence: &mut Persistence,
    notification_id: &str,
    actor: &AuthenticatedActor,
) -> Result<Notification, ApiError> {
    let notification: Notification = persistence
        .get_notification(notification_id)
        .map_err(|e| translate_persistence_error(e, "Notification"))?;

    if notification
        .target_user_id
        .as_deref()
        .is_some_and(|target| target != actor.id)
    {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification '{notification_id}' does not exist"),
        });
    }

    persistence
        .mark_notification_read(notification_id)
        .map_err(|e| translate_persistence_error(e, "Notification"))?;
    debug!(notification_id, actor_id = %actor.id, "Notification marked read");

    Ok(Notification {
        read: true,
        ..notification
    })
}

// ============================================================================
// Profiles and roles
// ============================================================================

/// Creates the actor's own profile.
///
/// # Errors
///
/// Returns an error if a profile already exists for the actor or a field is
/// invalid.
pub fn create_profile(
    persistence: &mut Persistence,
    request: ProfileRequest,
    actor: &AuthenticatedActor,
) -> Result<ProfileResponse, ApiError> {
    match persistence.get_profile(&actor.id) {
        Ok(_) => {
            return Err(ApiError::Conflict {
                message: format!("A profile for '{}' already exists", actor.id),
            });
        }
        Err(PersistenceError::NotFound(_)) => {}
        Err(e) => return Err(internal(e)),
    }

    let profile: Profile = Profile::new(
        &actor.id,
        &request.email,
        &request.display_name,
        request.photo_url,
    )
    .map_err(translate_domain_error)?;
    persistence.upsert_profile(&profile).map_err(internal)?;

    info!(profile_id = %profile.id, "Profile created");

    Ok(ProfileResponse {
        message: format!("Profile for '{}' created", profile.id),
        profile,
    })
}

/// Replaces a profile's fields. Users may update their own profile; admins
/// may update any.
///
/// # Errors
///
/// Returns an error if the actor may not edit the profile, the profile does
/// not exist, or a field is invalid.
pub fn update_profile(
    persistence: &mut Persistence,
    profile_id: &str,
    request: ProfileRequest,
    actor: &AuthenticatedActor,
) -> Result<ProfileResponse, ApiError> {
    AuthorizationService::require_self_or_admin(actor, profile_id, "update_other_profile")?;

    persistence
        .get_profile(profile_id)
        .map_err(|e| translate_persistence_error(e, "Profile"))?;

    let profile: Profile = Profile::new(
        profile_id,
        &request.email,
        &request.display_name,
        request.photo_url,
    )
    .map_err(translate_domain_error)?;
    persistence.upsert_profile(&profile).map_err(internal)?;

    info!(profile_id, actor_id = %actor.id, "Profile updated");

    Ok(ProfileResponse {
        message: format!("Profile for '{profile_id}' updated"),
        profile,
    })
}

/// Returns a stored profile.
///
/// # Errors
///
/// Returns an error if the profile does not exist.
pub fn get_profile(persistence: &mut Persistence, profile_id: &str) -> Result<Profile, ApiError> {
    persistence
        .get_profile(profile_id)
        .map_err(|e| translate_persistence_error(e, "Profile"))
}

/// Maps a custom user id to a role and records the change in the audit log.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the user id is blank, or
/// the role is unknown.
pub fn assign_role(
    persistence: &mut Persistence,
    request: &AssignRoleRequest,
    actor: &AuthenticatedActor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<AssignRoleResponse>, ApiError> {
    AuthorizationService::require_admin(actor, "assign_role")?;

    let user_id: &str = request.user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("User id cannot be empty"),
        });
    }
    let role: Role = Role::parse_str(&request.role).map_err(translate_domain_error)?;

    let previous: Option<Role> = persistence.get_user_role(user_id).map_err(internal)?;
    persistence.set_user_role(user_id, role).map_err(internal)?;

    let event: AuditEvent = AuditEvent::new(
        actor.to_audit_actor(),
        cause,
        Action::new(String::from("AssignRole"), Some(format!("{user_id} -> {role}"))),
        StateSnapshot::new(format!(
            "user={user_id},role={}",
            previous.map_or("none", |r| r.as_str())
        )),
        StateSnapshot::new(format!("user={user_id},role={role}")),
        None,
    );
    let event_id: i64 = persistence.persist_audit_event(&event, now).map_err(internal)?;

    info!(user_id, role = %role, actor_id = %actor.id, "Role assigned");

    Ok(ApiResult::quiet(AssignRoleResponse {
        event_id,
        user_id: user_id.to_string(),
        role: role.as_str().to_string(),
        message: format!("'{user_id}' is now {role}"),
    }))
}

/// Grants the admin role to `user_id` unless it already holds it.
///
/// Returns true if a role was written.
///
/// # Errors
///
/// Returns an error if the user id is blank or the store fails.
pub fn ensure_bootstrap_admin(
    persistence: &mut Persistence,
    user_id: &str,
) -> Result<bool, ApiError> {
    let user_id: &str = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("bootstrap_admin"),
            message: String::from("Bootstrap admin id cannot be empty"),
        });
    }

    if persistence.get_user_role(user_id).map_err(internal)? == Some(Role::Admin) {
        return Ok(false);
    }
    persistence
        .set_user_role(user_id, Role::Admin)
        .map_err(internal)?;
    info!(user_id, "Bootstrap admin granted");
    Ok(true)
}

// ============================================================================
// Analytics and audit
// ============================================================================

/// Summarizes lot usage over the confirmed booking history.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the read fails.
pub fn get_usage_summary(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<UsageSummary, ApiError> {
    AuthorizationService::require_admin(actor, "get_usage_summary")?;
    let history: Vec<Booking> = persistence.list_booking_history().map_err(internal)?;
    Ok(UsageSummary::compute(&history))
}

/// Returns the audit trail of one slot, oldest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the slot id is unknown.
pub fn get_slot_audit(
    persistence: &mut Persistence,
    slot_id: &str,
    actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    AuthorizationService::require_admin(actor, "get_slot_audit")?;
    let slot_id: SlotId = parse_slot_id(slot_id)?;
    let events: Vec<AuditEvent> = persistence
        .list_audit_events_for_slot(&slot_id)
        .map_err(internal)?;
    Ok(AuditTimelineResponse {
        slot_id: slot_id.to_string(),
        events,
    })
}
