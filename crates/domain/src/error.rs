// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A single rejected form field.
///
/// Validation collects every failing field so the caller can render
/// inline messages for all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The form field name (e.g., `contact_number`).
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

impl FieldError {
    /// Creates a new `FieldError`.
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Slot identifier is malformed or not part of the lot layout.
    InvalidSlotId(String),
    /// The slot does not exist in the lot.
    SlotNotFound(String),
    /// Slot status string is not a known status.
    InvalidSlotStatus(String),
    /// Priority tag is not one of the known tags.
    InvalidPriorityTag(String),
    /// Request status string is not a known status.
    InvalidRequestStatus(String),
    /// Issue status string is not a known status.
    InvalidIssueStatus(String),
    /// Role string is not a known role.
    InvalidRole(String),
    /// One or more booking form fields are blank or malformed.
    InvalidBookingForm {
        /// Every field that failed validation.
        fields: Vec<FieldError>,
    },
    /// A booking form is required for this transition but none was given.
    MissingBookingForm {
        /// The slot being transitioned.
        slot_id: String,
        /// The requested target status.
        target: String,
    },
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A reservation request is no longer pending.
    RequestNotPending {
        /// The request identifier.
        request_id: String,
        /// The request's current status.
        status: String,
    },
    /// Issue report is missing or has invalid fields.
    InvalidIssue(String),
    /// Profile fields are invalid.
    InvalidProfile(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSlotId(id) => write!(f, "Invalid slot identifier: '{id}'"),
            Self::SlotNotFound(id) => write!(f, "Slot '{id}' does not exist"),
            Self::InvalidSlotStatus(s) => write!(f, "Invalid slot status: '{s}'"),
            Self::InvalidPriorityTag(s) => write!(f, "Invalid priority tag: '{s}'"),
            Self::InvalidRequestStatus(s) => write!(f, "Invalid request status: '{s}'"),
            Self::InvalidIssueStatus(s) => write!(f, "Invalid issue status: '{s}'"),
            Self::InvalidRole(s) => write!(f, "Invalid role: '{s}'"),
            Self::InvalidBookingForm { fields } => {
                let joined: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "Invalid booking form: {}", joined.join("; "))
            }
            Self::MissingBookingForm { slot_id, target } => {
                write!(
                    f,
                    "A booking form is required to move slot {slot_id} to {target}"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::RequestNotPending { request_id, status } => {
                write!(
                    f,
                    "Reservation request {request_id} is not pending (status: {status})"
                )
            }
            Self::InvalidIssue(msg) => write!(f, "Invalid issue: {msg}"),
            Self::InvalidProfile(msg) => write!(f, "Invalid profile: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
