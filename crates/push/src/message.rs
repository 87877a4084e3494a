// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use parkit_domain::{Audience, Notification, NotificationDraft};
use serde::{Deserialize, Serialize};

/// Delivery priority requested from the push service.
pub const HIGH_PRIORITY: u8 = 10;

/// A push message ready to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    pub title: String,
    pub message: String,
    /// Notification kind tag, passed through as payload data.
    pub kind: String,
    pub audience: Audience,
}

impl PushMessage {
    /// Builds a push message from a notification draft.
    #[must_use]
    pub fn from_draft(draft: &NotificationDraft) -> Self {
        Self {
            title: draft.title.clone(),
            message: draft.message.clone(),
            kind: draft.kind.as_str().to_string(),
            audience: draft.audience.clone(),
        }
    }

    /// Builds a push message from a stored notification record.
    #[must_use]
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_string(),
            audience: Audience::from_target(notification.target_user_id.clone()),
        }
    }
}

/// Request body sent to the push service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushRequestBody<'a> {
    pub app_id: &'a str,
    pub headings: BTreeMap<&'static str, &'a str>,
    pub contents: BTreeMap<&'static str, &'a str>,
    pub priority: u8,
    pub data: BTreeMap<&'static str, &'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_segments: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_external_user_ids: Option<Vec<&'a str>>,
}

impl<'a> PushRequestBody<'a> {
    /// Addresses a broadcast to `segment` and a targeted message to its user.
    pub fn new(app_id: &'a str, segment: &'a str, message: &'a PushMessage) -> Self {
        let (included_segments, include_external_user_ids) = match &message.audience {
            Audience::User(user_id) => (None, Some(vec![user_id.as_str()])),
            Audience::Broadcast => (Some(vec![segment]), None),
        };
        Self {
            app_id,
            headings: BTreeMap::from([("en", message.title.as_str())]),
            contents: BTreeMap::from([("en", message.message.as_str())]),
            priority: HIGH_PRIORITY,
            data: BTreeMap::from([("type", message.kind.as_str())]),
            included_segments,
            include_external_user_ids,
        }
    }
}

/// Success response from the push service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PushReceipt {
    /// Service-assigned notification id, when one was created.
    #[serde(default)]
    pub id: Option<String>,
    /// Number of devices the message was delivered to, if reported.
    #[serde(default)]
    pub recipients: Option<u64>,
}
