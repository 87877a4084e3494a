// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use parkit::{Command, LotState};
use parkit_domain::{Issue, IssueStatus, IssueType, RequestStatus, ReservationRequest, SlotStatus};
use time::macros::datetime;

use crate::tests::{
    create_test_actor, create_test_form, create_test_user, run, seeded_persistence, slot,
    test_now,
};
use crate::{Persistence, PersistenceError};

fn submit(persistence: &mut Persistence, request_id: &str, slot_id: &str) {
    run(
        persistence,
        Command::SubmitReservationRequest {
            slot_id: slot(slot_id),
            form: create_test_form("driver42"),
            request_id: request_id.to_string(),
        },
        create_test_user(),
        request_id,
        test_now(),
    );
}

#[test]
fn test_submitted_request_is_stored_pending() {
    let mut persistence: Persistence = seeded_persistence();

    submit(&mut persistence, "req-1", "G2");

    let request: ReservationRequest = persistence.get_reservation_request("req-1").unwrap();
    assert_eq!(request.request_status, RequestStatus::Pending);
    assert_eq!(request.booking.slot_id, slot("G2"));
    assert_eq!(request.booking.user_id, "driver42");

    let state: LotState = persistence.load_lot_state().unwrap();
    assert_eq!(state.slot(&slot("G2")).unwrap().status, SlotStatus::Reserved);
}

#[test]
fn test_approval_updates_request_and_slot() {
    let mut persistence: Persistence = seeded_persistence();
    submit(&mut persistence, "req-2", "H1");
    let request: ReservationRequest = persistence.get_reservation_request("req-2").unwrap();

    run(
        &mut persistence,
        Command::ApproveReservationRequest { request },
        create_test_actor(),
        "approve",
        test_now(),
    );

    let stored: ReservationRequest = persistence.get_reservation_request("req-2").unwrap();
    assert_eq!(stored.request_status, RequestStatus::Approved);
    let state: LotState = persistence.load_lot_state().unwrap();
    assert_eq!(state.slot(&slot("H1")).unwrap().status, SlotStatus::Booked);
    assert_eq!(persistence.list_booking_history().unwrap().len(), 1);
}

#[test]
fn test_list_requests_filters_by_status() {
    let mut persistence: Persistence = seeded_persistence();
    submit(&mut persistence, "req-3", "I1");
    submit(&mut persistence, "req-4", "I2");
    let request: ReservationRequest = persistence.get_reservation_request("req-3").unwrap();
    run(
        &mut persistence,
        Command::RejectReservationRequest { request },
        create_test_actor(),
        "reject",
        test_now(),
    );

    let pending: Vec<ReservationRequest> = persistence
        .list_reservation_requests(Some(RequestStatus::Pending))
        .unwrap();
    let all: Vec<ReservationRequest> = persistence.list_reservation_requests(None).unwrap();

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].request_id, "req-4");
    assert_eq!(all.len(), 2);
}

#[test]
fn test_missing_request_is_not_found() {
    let mut persistence: Persistence = seeded_persistence();

    assert!(matches!(
        persistence.get_reservation_request("nope"),
        Err(PersistenceError::NotFound(_))
    ));
}

#[test]
fn test_issue_lifecycle() {
    let mut persistence: Persistence = seeded_persistence();
    run(
        &mut persistence,
        Command::ReportIssue {
            issue_id: String::from("iss-1"),
            slot_id: slot("J3"),
            issue_type: IssueType::PoorLighting,
            description: None,
        },
        create_test_user(),
        "report",
        datetime!(2026-03-02 20:00 UTC),
    );

    let issue: Issue = persistence.get_issue("iss-1").unwrap();
    assert_eq!(issue.status, IssueStatus::Pending);
    assert_eq!(issue.zone_name, "Zone J");
    assert_eq!(issue.reported_by, "driver42");
    assert_eq!(issue.reported_at, datetime!(2026-03-02 20:00 UTC));

    run(
        &mut persistence,
        Command::UpdateIssueStatus {
            issue,
            status: IssueStatus::InProgress,
        },
        create_test_actor(),
        "update",
        test_now(),
    );
    assert_eq!(
        persistence.get_issue("iss-1").unwrap().status,
        IssueStatus::InProgress
    );
    assert_eq!(persistence.list_issues().unwrap().len(), 1);

    let issue: Issue = persistence.get_issue("iss-1").unwrap();
    run(
        &mut persistence,
        Command::DeleteIssue { issue },
        create_test_actor(),
        "delete",
        test_now(),
    );
    assert!(matches!(
        persistence.get_issue("iss-1"),
        Err(PersistenceError::NotFound(_))
    ));
    assert!(persistence.list_issues().unwrap().is_empty());
}
