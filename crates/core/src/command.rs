// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkit_domain::{
    BookingForm, Issue, IssueStatus, IssueType, ReservationRequest, SlotId, SlotStatus,
};

/// A command represents user or admin intent as data only.
///
/// Commands are the only way to request state changes. Records that live
/// outside the lot state (reservation requests, issues) are loaded by the
/// caller and carried in the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move a slot to a new status.
    ChangeSlotStatus {
        /// The slot to change.
        slot_id: SlotId,
        /// The requested status.
        target: SlotStatus,
        /// Booking form, required when a new booking must be created.
        form: Option<BookingForm>,
    },
    /// Ask an admin to reserve an available slot.
    SubmitReservationRequest {
        /// The requested slot.
        slot_id: SlotId,
        /// The booking the request would create.
        form: BookingForm,
        /// Identifier to assign to the new request.
        request_id: String,
    },
    /// Approve a pending reservation request.
    ApproveReservationRequest {
        /// The request as currently stored.
        request: ReservationRequest,
    },
    /// Reject a pending reservation request.
    RejectReservationRequest {
        /// The request as currently stored.
        request: ReservationRequest,
    },
    /// Report a problem with a slot.
    ReportIssue {
        /// Identifier to assign to the new issue.
        issue_id: String,
        /// The affected slot.
        slot_id: SlotId,
        /// The kind of problem.
        issue_type: IssueType,
        /// Free-text description, required for `Other`.
        description: Option<String>,
    },
    /// Move a reported issue to a new status.
    UpdateIssueStatus {
        /// The issue as currently stored.
        issue: Issue,
        /// The new status.
        status: IssueStatus,
    },
    /// Remove a reported issue.
    DeleteIssue {
        /// The issue as currently stored.
        issue: Issue,
    },
}

impl Command {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeSlotStatus { .. } => "ChangeSlotStatus",
            Self::SubmitReservationRequest { .. } => "SubmitReservationRequest",
            Self::ApproveReservationRequest { .. } => "ApproveReservationRequest",
            Self::RejectReservationRequest { .. } => "RejectReservationRequest",
            Self::ReportIssue { .. } => "ReportIssue",
            Self::UpdateIssueStatus { .. } => "UpdateIssueStatus",
            Self::DeleteIssue { .. } => "DeleteIssue",
        }
    }
}
