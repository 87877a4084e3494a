// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::layout::{SlotId, zone_name};
use crate::tags::{IssueStatus, wire_enum};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

wire_enum! {
    /// Catalog of reportable slot problems.
    pub enum IssueType: InvalidIssue {
        BlockedSlot => "Blocked Slot",
        DamagedSurface => "Damaged Surface",
        PoorLighting => "Poor Lighting",
        UnauthorizedVehicle => "Unauthorized Vehicle",
        MissingSignage => "Missing Signage",
        /// Free-text issue; requires a description.
        Other => "Other",
    }
}

/// A problem reported against a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub issue_id: String,
    pub slot_id: SlotId,
    pub zone_name: String,
    pub issue_type: IssueType,
    pub description: Option<String>,
    /// Custom id of the reporting user.
    pub reported_by: String,
    pub status: IssueStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub reported_at: OffsetDateTime,
}

impl Issue {
    /// Creates a new pending issue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIssue` if the issue type is `Other` and no
    /// description was given, or if the reporter is blank.
    pub fn new(
        issue_id: String,
        slot_id: SlotId,
        issue_type: IssueType,
        description: Option<String>,
        reported_by: &str,
        reported_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        let description: Option<String> = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        if issue_type == IssueType::Other && description.is_none() {
            return Err(DomainError::InvalidIssue(String::from(
                "a description is required for issue type Other",
            )));
        }
        if reported_by.trim().is_empty() {
            return Err(DomainError::InvalidIssue(String::from(
                "reporter cannot be empty",
            )));
        }

        Ok(Self {
            issue_id,
            zone_name: zone_name(slot_id.zone()),
            slot_id,
            issue_type,
            description,
            reported_by: reported_by.trim().to_string(),
            status: IssueStatus::Pending,
            reported_at,
        })
    }

    /// Returns a copy of this issue with a different status.
    #[must_use]
    pub fn with_status(&self, status: IssueStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}
