// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use parkit::CoreError;
use parkit_domain::{DomainError, FieldError};
use parkit_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A booking form failed validation.
    InvalidForm {
        /// Every offending field.
        fields: Vec<FieldError>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current stored state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidForm { fields } => {
                let joined: Vec<String> = fields.iter().map(ToString::to_string).collect();
                write!(f, "Invalid booking form: {}", joined.join("; "))
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidSlotId(id) => ApiError::InvalidInput {
            field: String::from("slot_id"),
            message: format!("'{id}' is not a slot in this lot"),
        },
        DomainError::SlotNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot '{id}' does not exist"),
        },
        DomainError::InvalidSlotStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown slot status '{s}'"),
        },
        DomainError::InvalidPriorityTag(s) => ApiError::InvalidInput {
            field: String::from("priority"),
            message: format!("Unknown priority tag '{s}'"),
        },
        DomainError::InvalidRequestStatus(s) | DomainError::InvalidIssueStatus(s) => {
            ApiError::InvalidInput {
                field: String::from("status"),
                message: format!("Unknown status '{s}'"),
            }
        }
        DomainError::InvalidRole(s) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{s}'"),
        },
        DomainError::InvalidBookingForm { fields } => ApiError::InvalidForm { fields },
        DomainError::MissingBookingForm { slot_id, target } => ApiError::InvalidInput {
            field: String::from("booking"),
            message: format!("A booking form is required to move slot {slot_id} to {target}"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message: format!("Cannot move from {from} to {to}: {reason}"),
            }
        }
        DomainError::RequestNotPending { request_id, status } => ApiError::Conflict {
            message: format!("Reservation request {request_id} was already {status}"),
        },
        DomainError::InvalidIssue(msg) => ApiError::InvalidInput {
            field: String::from("issue"),
            message: msg,
        },
        DomainError::InvalidProfile(msg) => ApiError::InvalidInput {
            field: String::from("profile"),
            message: msg,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InconsistentState(msg) => ApiError::Internal {
            message: format!("Stored lot state is inconsistent: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// `NotFound` becomes a resource error for the named resource type; every
/// other failure is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
