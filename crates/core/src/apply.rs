// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkit_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use parkit_domain::{
    Booking, BookingDetails, BookingForm, DomainError, Issue, IssueStatus, IssueType,
    NotificationDraft, NotificationKind, RequestStatus, ReservationRequest, Slot, SlotId,
    SlotStatus, validate_booking_form,
};
use time::OffsetDateTime;

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{BookingChange, IssueChange, LotChange, LotState, TransitionResult};

/// Everything a command handler produces before the audit event is attached.
struct Outcome {
    new_state: LotState,
    changes: Vec<LotChange>,
    notifications: Vec<NotificationDraft>,
    slot_id: Option<SlotId>,
    before: StateSnapshot,
    after: StateSnapshot,
    details: String,
}

impl Outcome {
    /// Queues a notification for a user. Records without a known user id
    /// produce none.
    fn notify_user(
        &mut self,
        user_id: &str,
        title: &str,
        message: String,
        kind: NotificationKind,
    ) {
        if user_id.trim().is_empty() {
            return;
        }
        self.notifications
            .push(NotificationDraft::to_user(user_id, title, message, kind));
    }

    fn unchanged(state: &LotState, slot_id: Option<SlotId>) -> Self {
        Self {
            new_state: state.clone(),
            changes: Vec::new(),
            notifications: Vec::new(),
            slot_id,
            before: StateSnapshot::new(String::new()),
            after: StateSnapshot::new(String::new()),
            details: String::new(),
        }
    }
}

/// Applies a command to the current lot state, producing a new state, the
/// storage writes that realize it, the notifications it triggers and an
/// audit event.
///
/// This function is pure: it never touches storage or the clock. The
/// caller supplies `now`, which stamps any records the command creates.
///
/// # Arguments
///
/// * `state` - The current lot state (immutable)
/// * `command` - The command to apply
/// * `actor` - The caller performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The timestamp for newly created records
///
/// # Errors
///
/// Returns an error if:
/// - The slot does not exist
/// - The requested status equals the current status
/// - A booking form is required but missing, or has invalid fields
/// - A reservation request is no longer pending, or its slot was taken
/// - An issue report is invalid
pub fn apply(
    state: &LotState,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();

    let outcome: Outcome = match command {
        Command::ChangeSlotStatus {
            slot_id,
            target,
            form,
        } => change_slot_status(state, &slot_id, target, form.as_ref(), &actor.id, now)?,
        Command::SubmitReservationRequest {
            slot_id,
            form,
            request_id,
        } => submit_request(state, &slot_id, &form, request_id, &actor.id, now)?,
        Command::ApproveReservationRequest { request } => approve_request(state, &request)?,
        Command::RejectReservationRequest { request } => reject_request(state, &request)?,
        Command::ReportIssue {
            issue_id,
            slot_id,
            issue_type,
            description,
        } => report_issue(
            state,
            issue_id,
            slot_id,
            issue_type,
            description,
            &actor.id,
            now,
        )?,
        Command::UpdateIssueStatus { issue, status } => update_issue(state, &issue, status),
        Command::DeleteIssue { issue } => delete_issue(state, &issue),
    };

    if let Some(slot_id) = &outcome.slot_id {
        outcome.new_state.check_slot_consistency(slot_id)?;
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from(name), Some(outcome.details)),
        outcome.before,
        outcome.after,
        outcome.slot_id,
    );

    Ok(TransitionResult {
        new_state: outcome.new_state,
        changes: outcome.changes,
        notifications: outcome.notifications,
        audit_event,
    })
}

#[allow(clippy::too_many_lines)]
fn change_slot_status(
    state: &LotState,
    slot_id: &SlotId,
    target: SlotStatus,
    form: Option<&BookingForm>,
    actor_id: &str,
    now: OffsetDateTime,
) -> Result<Outcome, CoreError> {
    let slot: Slot = state.slot(slot_id)?.clone();
    let from: SlotStatus = slot.status;
    from.validate_transition(target)?;

    let mut outcome: Outcome = Outcome::unchanged(state, Some(slot_id.clone()));
    outcome.before = state.slot_snapshot(slot_id);

    let updated: Slot = slot.with_status(target);
    outcome
        .new_state
        .slots
        .insert(slot_id.clone(), updated.clone());
    outcome.changes.push(LotChange::Slot(updated));

    match target {
        SlotStatus::Booked | SlotStatus::Reserved => {
            let booking: Booking = booking_for_target(
                slot_id,
                from,
                target,
                form,
                state.booking(slot_id),
                actor_id,
                now,
            )?;
            outcome
                .new_state
                .bookings
                .insert(slot_id.clone(), booking.clone());
            outcome
                .changes
                .push(LotChange::Booking(BookingChange::Upsert(booking.clone())));
            if target == SlotStatus::Booked {
                outcome.notify_user(
                    &booking.user_id,
                    "Booking Confirmed",
                    format!(
                        "Your booking for slot {slot_id} in {} is confirmed.",
                        slot.zone_name
                    ),
                    NotificationKind::BookingConfirmed,
                );
                outcome.changes.push(LotChange::History(booking));
            }
        }
        SlotStatus::Maintenance => {
            outcome.notifications.push(NotificationDraft::broadcast(
                "Slot Under Maintenance",
                format!(
                    "Slot {slot_id} in {} is under maintenance and cannot be booked.",
                    slot.zone_name
                ),
                NotificationKind::Maintenance,
            ));
            if let Some(displaced) = outcome.new_state.bookings.remove(slot_id) {
                outcome
                    .changes
                    .push(LotChange::Booking(BookingChange::Delete(slot_id.clone())));
                outcome.notify_user(
                    &displaced.user_id,
                    "Booking Auto-Cancelled",
                    format!(
                        "Your booking for slot {slot_id} was cancelled because the slot \
                         is under maintenance."
                    ),
                    NotificationKind::BookingCancelled,
                );
            }
        }
        SlotStatus::Available => {
            if let Some(cancelled) = outcome.new_state.bookings.remove(slot_id) {
                outcome
                    .changes
                    .push(LotChange::Booking(BookingChange::Delete(slot_id.clone())));
                if from.holds_booking() {
                    outcome.notify_user(
                        &cancelled.user_id,
                        "Booking Cancelled",
                        format!("Your booking for slot {slot_id} has been cancelled."),
                        NotificationKind::BookingCancelled,
                    );
                }
            }
        }
    }

    outcome.after = outcome.new_state.slot_snapshot(slot_id);
    outcome.details = format!("{slot_id}: {from} -> {target}");
    Ok(outcome)
}

/// Produces the booking record a slot carries after moving to `BOOKED` or
/// `RESERVED`.
///
/// A supplied form always creates a fresh record. Without one, a record is
/// carried over only when the slot already holds a booking.
fn booking_for_target(
    slot_id: &SlotId,
    from: SlotStatus,
    target: SlotStatus,
    form: Option<&BookingForm>,
    existing: Option<&Booking>,
    booked_by: &str,
    now: OffsetDateTime,
) -> Result<Booking, CoreError> {
    if let Some(form) = form {
        let details: BookingDetails = validate_booking_form(form)?;
        return Ok(Booking::from_details(
            slot_id.clone(),
            details,
            target,
            booked_by,
            now,
        ));
    }
    match existing {
        Some(booking) if from.holds_booking() => Ok(booking.with_status(target)),
        _ => Err(CoreError::DomainViolation(
            DomainError::MissingBookingForm {
                slot_id: slot_id.to_string(),
                target: target.to_string(),
            },
        )),
    }
}

/// True if the slot's current booking is the one created by this request.
fn is_held_by(booking: Option<&Booking>, request: &ReservationRequest) -> bool {
    booking.is_some_and(|b| {
        b.status == SlotStatus::Reserved
            && b.user_id == request.booking.user_id
            && b.created_at == request.booking.created_at
    })
}

fn submit_request(
    state: &LotState,
    slot_id: &SlotId,
    form: &BookingForm,
    request_id: String,
    actor_id: &str,
    now: OffsetDateTime,
) -> Result<Outcome, CoreError> {
    let slot: Slot = state.slot(slot_id)?.clone();
    if slot.status != SlotStatus::Available {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: slot.status.to_string(),
                to: SlotStatus::Reserved.to_string(),
                reason: String::from("only available slots can be requested"),
            },
        ));
    }
    let details: BookingDetails = validate_booking_form(form)?;
    let booking: Booking =
        Booking::from_details(slot_id.clone(), details, SlotStatus::Reserved, actor_id, now);
    let request: ReservationRequest = ReservationRequest {
        request_id,
        booking: booking.clone(),
        request_status: RequestStatus::Pending,
    };

    let mut outcome: Outcome = Outcome::unchanged(state, Some(slot_id.clone()));
    outcome.before = state.slot_snapshot(slot_id);

    let reserved: Slot = slot.with_status(SlotStatus::Reserved);
    outcome
        .new_state
        .slots
        .insert(slot_id.clone(), reserved.clone());
    outcome
        .new_state
        .bookings
        .insert(slot_id.clone(), booking.clone());
    outcome.changes.push(LotChange::Slot(reserved));
    outcome
        .changes
        .push(LotChange::Booking(BookingChange::Upsert(booking)));
    outcome.details = format!(
        "Request {} for {slot_id} by {}",
        request.request_id, request.booking.user_id
    );
    outcome.changes.push(LotChange::Request(request));
    outcome.after = outcome.new_state.slot_snapshot(slot_id);
    Ok(outcome)
}

fn approve_request(
    state: &LotState,
    request: &ReservationRequest,
) -> Result<Outcome, CoreError> {
    request.ensure_pending()?;
    let slot_id: SlotId = request.booking.slot_id.clone();
    let slot: Slot = state.slot(&slot_id)?.clone();

    let held: bool = is_held_by(state.booking(&slot_id), request);
    if !held && slot.status != SlotStatus::Available {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition {
                from: slot.status.to_string(),
                to: SlotStatus::Booked.to_string(),
                reason: format!("slot is no longer held for request {}", request.request_id),
            },
        ));
    }

    let mut outcome: Outcome = Outcome::unchanged(state, Some(slot_id.clone()));
    outcome.before = state.slot_snapshot(&slot_id);

    let booked: Slot = slot.with_status(SlotStatus::Booked);
    let booking: Booking = request.booking.with_status(SlotStatus::Booked);
    outcome
        .new_state
        .slots
        .insert(slot_id.clone(), booked.clone());
    outcome
        .new_state
        .bookings
        .insert(slot_id.clone(), booking.clone());

    outcome.changes.push(LotChange::Request(
        request.with_request_status(RequestStatus::Approved),
    ));
    outcome.changes.push(LotChange::Slot(booked));
    outcome
        .changes
        .push(LotChange::Booking(BookingChange::Upsert(booking.clone())));
    outcome.changes.push(LotChange::History(booking));

    outcome.notify_user(
        &request.booking.user_id,
        "Reservation Approved",
        format!(
            "Your reservation request for slot {slot_id} has been approved. \
             Your booking is confirmed."
        ),
        NotificationKind::ReservationApproved,
    );

    outcome.after = outcome.new_state.slot_snapshot(&slot_id);
    outcome.details = format!("Approved request {} for {slot_id}", request.request_id);
    Ok(outcome)
}

fn reject_request(
    state: &LotState,
    request: &ReservationRequest,
) -> Result<Outcome, CoreError> {
    request.ensure_pending()?;
    let slot_id: SlotId = request.booking.slot_id.clone();
    let slot: Slot = state.slot(&slot_id)?.clone();

    let mut outcome: Outcome = Outcome::unchanged(state, Some(slot_id.clone()));
    outcome.before = state.slot_snapshot(&slot_id);
    outcome.changes.push(LotChange::Request(
        request.with_request_status(RequestStatus::Rejected),
    ));

    if is_held_by(state.booking(&slot_id), request) {
        let freed: Slot = slot.with_status(SlotStatus::Available);
        outcome
            .new_state
            .slots
            .insert(slot_id.clone(), freed.clone());
        outcome.new_state.bookings.remove(&slot_id);
        outcome.changes.push(LotChange::Slot(freed));
        outcome
            .changes
            .push(LotChange::Booking(BookingChange::Delete(slot_id.clone())));
    }

    outcome.notify_user(
        &request.booking.user_id,
        "Reservation Rejected",
        format!("Your reservation request for slot {slot_id} has been rejected."),
        NotificationKind::ReservationRejected,
    );

    outcome.after = outcome.new_state.slot_snapshot(&slot_id);
    outcome.details = format!("Rejected request {} for {slot_id}", request.request_id);
    Ok(outcome)
}

fn issue_snapshot(issue: &Issue, status: &str) -> StateSnapshot {
    StateSnapshot::new(format!(
        "issue={},slot={},status={status}",
        issue.issue_id, issue.slot_id
    ))
}

fn report_issue(
    state: &LotState,
    issue_id: String,
    slot_id: SlotId,
    issue_type: IssueType,
    description: Option<String>,
    actor_id: &str,
    now: OffsetDateTime,
) -> Result<Outcome, CoreError> {
    state.slot(&slot_id)?;
    let issue: Issue =
        Issue::new(issue_id, slot_id.clone(), issue_type, description, actor_id, now)?;

    let mut outcome: Outcome = Outcome::unchanged(state, Some(slot_id));
    outcome.before = StateSnapshot::new(format!("issue={},status=none", issue.issue_id));
    outcome.after = issue_snapshot(&issue, issue.status.as_str());
    outcome.details = format!(
        "{} reported on {} by {}",
        issue.issue_type, issue.slot_id, issue.reported_by
    );
    outcome
        .changes
        .push(LotChange::Issue(IssueChange::Upsert(issue)));
    Ok(outcome)
}

fn update_issue(state: &LotState, issue: &Issue, status: IssueStatus) -> Outcome {
    let updated: Issue = issue.with_status(status);

    let mut outcome: Outcome = Outcome::unchanged(state, Some(issue.slot_id.clone()));
    outcome.before = issue_snapshot(issue, issue.status.as_str());
    outcome.after = issue_snapshot(&updated, status.as_str());
    outcome.details = format!("Issue {}: {} -> {status}", issue.issue_id, issue.status);
    outcome.notify_user(
        &issue.reported_by,
        "Issue Update",
        format!(
            "Your report for slot {} ({}) is now {status}.",
            issue.slot_id, issue.issue_type
        ),
        NotificationKind::IssueUpdate,
    );
    outcome
        .changes
        .push(LotChange::Issue(IssueChange::Upsert(updated)));
    outcome
}

fn delete_issue(state: &LotState, issue: &Issue) -> Outcome {
    let mut outcome: Outcome = Outcome::unchanged(state, Some(issue.slot_id.clone()));
    outcome.before = issue_snapshot(issue, issue.status.as_str());
    outcome.after = issue_snapshot(issue, "deleted");
    outcome.details = format!("Deleted issue {}", issue.issue_id);
    outcome
        .changes
        .push(LotChange::Issue(IssueChange::Delete(issue.issue_id.clone())));
    outcome
}
