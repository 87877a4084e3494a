// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Notification category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    BookingConfirmed,
    BookingCancelled,
    Maintenance,
    StatusUpdate,
    NewReservation,
    ReservationApproved,
    ReservationRejected,
    IssueUpdate,
}

const KIND_TABLE: [(NotificationKind, &str); 8] = [
    (NotificationKind::BookingConfirmed, "booking_confirmed"),
    (NotificationKind::BookingCancelled, "booking_cancelled"),
    (NotificationKind::Maintenance, "maintenance"),
    (NotificationKind::StatusUpdate, "status_update"),
    (NotificationKind::NewReservation, "new_reservation"),
    (NotificationKind::ReservationApproved, "reservation_approved"),
    (NotificationKind::ReservationRejected, "reservation_rejected"),
    (NotificationKind::IssueUpdate, "issue_update"),
];

impl NotificationKind {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        KIND_TABLE
            .iter()
            .find(|(kind, _)| kind == self)
            .map_or("status_update", |(_, wire)| wire)
    }

    /// Decodes a stored kind. Unknown tags fall back to `StatusUpdate`.
    #[must_use]
    pub fn from_stored(s: &str) -> Self {
        KIND_TABLE
            .iter()
            .find(|(_, wire)| *wire == s.trim())
            .map_or(Self::StatusUpdate, |(kind, _)| *kind)
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for NotificationKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Ok(Self::from_stored(&raw))
    }
}

/// Who a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "audience", content = "user_id", rename_all = "snake_case")]
pub enum Audience {
    /// A single user, by custom user id.
    User(String),
    /// Every user.
    Broadcast,
}

impl Audience {
    /// Returns the target user id, or `None` for broadcasts.
    #[must_use]
    pub fn target_user_id(&self) -> Option<&str> {
        match self {
            Self::User(id) => Some(id),
            Self::Broadcast => None,
        }
    }

    /// Builds an audience from an optional stored target id.
    #[must_use]
    pub fn from_target(target: Option<String>) -> Self {
        target
            .filter(|id| !id.trim().is_empty())
            .map_or(Self::Broadcast, Self::User)
    }
}

/// A notification produced as a side effect of a lot operation.
///
/// Drafts have no id or timestamp yet; those are assigned when the draft is
/// dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub audience: Audience,
}

impl NotificationDraft {
    /// Creates a notification addressed to one user.
    #[must_use]
    pub fn to_user(user_id: &str, title: &str, message: String, kind: NotificationKind) -> Self {
        Self {
            title: title.to_string(),
            message,
            kind,
            audience: Audience::User(user_id.to_string()),
        }
    }

    /// Creates a notification addressed to every user.
    #[must_use]
    pub fn broadcast(title: &str, message: String, kind: NotificationKind) -> Self {
        Self {
            title: title.to_string(),
            message,
            kind,
            audience: Audience::Broadcast,
        }
    }
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub kind: NotificationKind,
    /// Target custom user id; `None` means broadcast.
    pub target_user_id: Option<String>,
    pub read: bool,
}

impl Notification {
    /// Materializes a draft into an unread notification record.
    #[must_use]
    pub fn from_draft(id: String, draft: &NotificationDraft, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            title: draft.title.clone(),
            message: draft.message.clone(),
            created_at,
            kind: draft.kind,
            target_user_id: draft.audience.target_user_id().map(ToString::to_string),
            read: false,
        }
    }

    /// Returns true if the notification is a broadcast.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.target_user_id.is_none()
    }
}
