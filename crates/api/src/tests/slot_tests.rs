// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot listing and direct status changes.

use parkit_audit::AuditEvent;
use parkit_domain::{Booking, BookingForm, NotificationKind, SlotStatus, total_slots};
use parkit_persistence::Persistence;

use crate::tests::helpers::{
    admin, book, cause, driver, form, now, other_driver, setup, status_request,
};
use crate::{
    ApiError, ApiResult, ChangeSlotStatusResponse, SlotView, change_slot_status, get_slot,
    list_active_bookings, list_booking_history, list_notifications, list_slots,
};

#[test]
fn test_fresh_lot_lists_every_slot_available() {
    let mut persistence: Persistence = setup();

    let slots: Vec<SlotView> = list_slots(&mut persistence).unwrap();

    assert_eq!(slots.len(), total_slots());
    assert!(slots.iter().all(|s| s.slot.status == SlotStatus::Available));
    assert!(slots.iter().all(|s| s.booking.is_none()));
    assert_eq!(slots[0].slot.id.to_string(), "A1");
}

#[test]
fn test_admin_books_slot_and_user_is_notified() {
    let mut persistence: Persistence = setup();

    let result: ApiResult<ChangeSlotStatusResponse> = change_slot_status(
        &mut persistence,
        "a1",
        status_request("BOOKED", Some(form("driver42"))),
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(result.response.slot.slot.status, SlotStatus::Booked);
    let booking: &Booking = result.response.slot.booking.as_ref().unwrap();
    assert_eq!(booking.user_id, "driver42");
    assert_eq!(booking.booked_by, "admin01");

    assert_eq!(result.notifications.len(), 1);
    assert_eq!(result.notifications[0].title, "Booking Confirmed");
    assert_eq!(result.notifications[0].kind, NotificationKind::BookingConfirmed);
    assert_eq!(
        result.notifications[0].target_user_id.as_deref(),
        Some("driver42")
    );

    let stored: SlotView = get_slot(&mut persistence, "A1").unwrap();
    assert_eq!(stored, result.response.slot);
    assert_eq!(
        list_notifications(&mut persistence, &driver())
            .unwrap()
            .unread,
        1
    );
    assert_eq!(
        list_notifications(&mut persistence, &other_driver())
            .unwrap()
            .unread,
        0
    );
}

#[test]
fn test_non_admin_cannot_change_status() {
    let mut persistence: Persistence = setup();

    let result = change_slot_status(
        &mut persistence,
        "A1",
        status_request("BOOKED", Some(form("driver42"))),
        &driver(),
        cause(),
        now(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(get_slot(&mut persistence, "A1").unwrap().booking.is_none());
}

#[test]
fn test_invalid_form_reports_every_field_and_writes_nothing() {
    let mut persistence: Persistence = setup();
    let mut bad: BookingForm = form("driver42");
    bad.vehicle_number = String::new();
    bad.contact_number = String::from("12ab");

    let result = change_slot_status(
        &mut persistence,
        "B2",
        status_request("BOOKED", Some(bad)),
        &admin(),
        cause(),
        now(),
    );

    match result {
        Err(ApiError::InvalidForm { fields }) => assert!(fields.len() >= 2),
        other => panic!("expected invalid form, got {other:?}"),
    }
    let slot: SlotView = get_slot(&mut persistence, "B2").unwrap();
    assert_eq!(slot.slot.status, SlotStatus::Available);
    assert!(slot.booking.is_none());
    assert!(
        persistence
            .list_audit_events_for_slot(&slot.slot.id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_booking_without_form_is_rejected() {
    let mut persistence: Persistence = setup();

    let result = change_slot_status(
        &mut persistence,
        "C1",
        status_request("RESERVED", None),
        &admin(),
        cause(),
        now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "booking"
    ));
}

#[test]
fn test_unknown_slot_and_status_are_invalid_input() {
    let mut persistence: Persistence = setup();

    assert!(matches!(
        get_slot(&mut persistence, "Z9"),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "slot_id"
    ));
    assert!(matches!(
        change_slot_status(
            &mut persistence,
            "A1",
            status_request("PARKED", None),
            &admin(),
            cause(),
            now(),
        ),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
}

#[test]
fn test_same_status_is_a_rule_violation() {
    let mut persistence: Persistence = setup();

    let result = change_slot_status(
        &mut persistence,
        "A1",
        status_request("AVAILABLE", None),
        &admin(),
        cause(),
        now(),
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_maintenance_broadcasts_once() {
    let mut persistence: Persistence = setup();

    let result: ApiResult<ChangeSlotStatusResponse> = change_slot_status(
        &mut persistence,
        "D3",
        status_request("MAINTENANCE", None),
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(result.response.slot.slot.status, SlotStatus::Maintenance);
    assert_eq!(result.notifications.len(), 1);
    assert!(result.notifications[0].is_broadcast());
    assert_eq!(
        list_notifications(&mut persistence, &driver())
            .unwrap()
            .notifications
            .len(),
        1
    );
    assert_eq!(
        list_notifications(&mut persistence, &other_driver())
            .unwrap()
            .notifications
            .len(),
        1
    );
}

#[test]
fn test_freeing_a_booked_slot_keeps_history() {
    let mut persistence: Persistence = setup();
    book(&mut persistence, "E1", "driver42");

    let freed: ApiResult<ChangeSlotStatusResponse> = change_slot_status(
        &mut persistence,
        "E1",
        status_request("AVAILABLE", None),
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(freed.response.slot.slot.status, SlotStatus::Available);
    assert!(freed.response.slot.booking.is_none());
    assert_eq!(freed.notifications[0].title, "Booking Cancelled");
    assert!(
        list_active_bookings(&mut persistence, &admin())
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        list_booking_history(&mut persistence, &admin())
            .unwrap()
            .len(),
        1
    );

    let timeline: Vec<AuditEvent> = persistence
        .list_audit_events_for_slot(&freed.response.slot.slot.id)
        .unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[1].event_id, Some(freed.response.event_id));
}

#[test]
fn test_booking_lists_are_admin_only() {
    let mut persistence: Persistence = setup();

    assert!(matches!(
        list_active_bookings(&mut persistence, &driver()),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        list_booking_history(&mut persistence, &driver()),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_slot_view_flattens_slot_fields() {
    let mut persistence: Persistence = setup();

    let view: SlotView = get_slot(&mut persistence, "A1").unwrap();
    let json: serde_json::Value = serde_json::to_value(&view).unwrap();

    assert_eq!(json["id"], "A1");
    assert_eq!(json["zone_name"], "Zone A");
    assert_eq!(json["status"], "AVAILABLE");
    assert!(json["booking"].is_null());
}
