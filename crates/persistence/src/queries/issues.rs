// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use parkit_domain::Issue;

use crate::data_models::IssueRow;
use crate::diesel_schema::issues;
use crate::error::PersistenceError;

/// Retrieves an issue by id.
///
/// # Errors
///
/// Returns `NotFound` if no such issue exists.
pub fn get_issue(conn: &mut SqliteConnection, issue_id: &str) -> Result<Issue, PersistenceError> {
    let row: IssueRow = issues::table
        .filter(issues::issue_id.eq(issue_id))
        .select(IssueRow::as_select())
        .first::<IssueRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("issue {issue_id}")))?;
    row.to_issue()
}

/// Lists every issue, most recently reported first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_issues(conn: &mut SqliteConnection) -> Result<Vec<Issue>, PersistenceError> {
    issues::table
        .order((issues::reported_at.desc(), issues::issue_id.asc()))
        .select(IssueRow::as_select())
        .load::<IssueRow>(conn)?
        .iter()
        .map(IssueRow::to_issue)
        .collect()
}
