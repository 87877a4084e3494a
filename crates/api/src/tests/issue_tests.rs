// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Issue reporting and resolution.

use parkit_domain::{Issue, IssueStatus, IssueType};
use parkit_persistence::Persistence;

use crate::request_response::{ReportIssueRequest, UpdateIssueStatusRequest};
use crate::tests::helpers::{admin, cause, driver, now, other_driver, setup};
use crate::{
    ApiError, ApiResult, DeleteIssueResponse, IssueResponse, delete_issue, list_issues,
    report_issue, update_issue_status,
};

fn report(issue_type: &str, description: Option<&str>) -> ReportIssueRequest {
    ReportIssueRequest {
        slot_id: String::from("F2"),
        issue_type: issue_type.to_string(),
        description: description.map(ToString::to_string),
    }
}

fn reported(persistence: &mut Persistence) -> Issue {
    report_issue(
        persistence,
        report("Blocked Slot", None),
        &driver(),
        cause(),
        now(),
    )
    .unwrap()
    .response
    .issue
}

#[test]
fn test_report_creates_pending_issue() {
    let mut persistence: Persistence = setup();

    let result: ApiResult<IssueResponse> = report_issue(
        &mut persistence,
        report("Poor Lighting", Some("  lamp is out ")),
        &driver(),
        cause(),
        now(),
    )
    .unwrap();

    let issue: &Issue = &result.response.issue;
    assert!(issue.issue_id.starts_with("iss_"));
    assert_eq!(issue.issue_type, IssueType::PoorLighting);
    assert_eq!(issue.description.as_deref(), Some("lamp is out"));
    assert_eq!(issue.status, IssueStatus::Pending);
    assert_eq!(issue.reported_by, "driver42");
    assert_eq!(issue.zone_name, "Zone F");
    assert!(result.notifications.is_empty());
    assert_eq!(persistence.get_issue(&issue.issue_id).unwrap(), *issue);
}

#[test]
fn test_other_requires_description() {
    let mut persistence: Persistence = setup();

    let result = report_issue(
        &mut persistence,
        report("Other", Some("   ")),
        &driver(),
        cause(),
        now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "issue"
    ));
    assert!(list_issues(&mut persistence, &admin()).unwrap().is_empty());
}

#[test]
fn test_unknown_issue_type_is_rejected() {
    let mut persistence: Persistence = setup();

    assert!(matches!(
        report_issue(
            &mut persistence,
            report("Flooded", None),
            &driver(),
            cause(),
            now(),
        ),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_issue_listing_is_scoped_to_reporter() {
    let mut persistence: Persistence = setup();
    reported(&mut persistence);

    assert_eq!(list_issues(&mut persistence, &driver()).unwrap().len(), 1);
    assert!(
        list_issues(&mut persistence, &other_driver())
            .unwrap()
            .is_empty()
    );
    assert_eq!(list_issues(&mut persistence, &admin()).unwrap().len(), 1);
}

#[test]
fn test_status_update_notifies_reporter() {
    let mut persistence: Persistence = setup();
    let issue: Issue = reported(&mut persistence);

    let result: ApiResult<IssueResponse> = update_issue_status(
        &mut persistence,
        &issue.issue_id,
        &UpdateIssueStatusRequest {
            status: String::from("in progress"),
        },
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(result.response.issue.status, IssueStatus::InProgress);
    assert_eq!(result.notifications.len(), 1);
    assert_eq!(result.notifications[0].title, "Issue Update");
    assert_eq!(
        result.notifications[0].target_user_id.as_deref(),
        Some("driver42")
    );
    assert_eq!(
        persistence.get_issue(&issue.issue_id).unwrap().status,
        IssueStatus::InProgress
    );
}

#[test]
fn test_status_update_requires_admin() {
    let mut persistence: Persistence = setup();
    let issue: Issue = reported(&mut persistence);

    let result = update_issue_status(
        &mut persistence,
        &issue.issue_id,
        &UpdateIssueStatusRequest {
            status: String::from("Resolved"),
        },
        &driver(),
        cause(),
        now(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_delete_removes_issue() {
    let mut persistence: Persistence = setup();
    let issue: Issue = reported(&mut persistence);

    let result: ApiResult<DeleteIssueResponse> = delete_issue(
        &mut persistence,
        &issue.issue_id,
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(result.response.issue_id, issue.issue_id);
    assert!(list_issues(&mut persistence, &admin()).unwrap().is_empty());
    assert!(matches!(
        delete_issue(&mut persistence, &issue.issue_id, &admin(), cause(), now()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
