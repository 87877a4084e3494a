// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller resolution, profiles, roles, analytics and audit access.

use parkit_analytics::UsageSummary;
use parkit_audit::AuditEvent;
use parkit_domain::{Profile, Role};
use parkit_persistence::Persistence;

use crate::request_response::{AssignRoleRequest, ProfileRequest};
use crate::tests::helpers::{admin, book, cause, driver, now, other_driver, setup};
use crate::{
    ApiError, ApiResult, AssignRoleResponse, AuditTimelineResponse, AuthError,
    AuthenticatedActor, AuthenticationService, ChangeSlotStatusResponse, ProfileResponse,
    assign_role, create_profile, ensure_bootstrap_admin, get_profile, get_slot_audit,
    get_usage_summary, update_profile,
};

fn profile_request(display_name: &str) -> ProfileRequest {
    ProfileRequest {
        email: String::from("asha@example.com"),
        display_name: display_name.to_string(),
        photo_url: None,
    }
}

fn role_request(user_id: &str, role: &str) -> AssignRoleRequest {
    AssignRoleRequest {
        user_id: user_id.to_string(),
        role: role.to_string(),
    }
}

#[test]
fn test_authenticate_resolves_known_ids() {
    let mut persistence: Persistence = setup();

    let actor: AuthenticatedActor =
        AuthenticationService::authenticate(&mut persistence, Some(" driver42 ")).unwrap();

    assert_eq!(actor, driver());
    assert!(!actor.is_admin());
    assert_eq!(actor.to_audit_actor().role, Role::User);
}

#[test]
fn test_authenticate_rejects_missing_and_unknown_ids() {
    let mut persistence: Persistence = setup();

    for user_id in [None, Some(""), Some("   "), Some("ghost")] {
        assert!(matches!(
            AuthenticationService::authenticate(&mut persistence, user_id),
            Err(AuthError::AuthenticationFailed { .. })
        ));
    }
}

#[test]
fn test_profile_is_created_once() {
    let mut persistence: Persistence = setup();

    let created: ProfileResponse =
        create_profile(&mut persistence, profile_request("Asha Rao"), &driver()).unwrap();

    assert_eq!(created.profile.id, "driver42");
    assert_eq!(get_profile(&mut persistence, "driver42").unwrap(), created.profile);
    assert!(matches!(
        create_profile(&mut persistence, profile_request("Asha"), &driver()),
        Err(ApiError::Conflict { .. })
    ));
}

#[test]
fn test_invalid_profile_is_rejected() {
    let mut persistence: Persistence = setup();
    let request: ProfileRequest = ProfileRequest {
        email: String::from("not-an-email"),
        display_name: String::from("Asha"),
        photo_url: None,
    };

    assert!(matches!(
        create_profile(&mut persistence, request, &driver()),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "profile"
    ));
}

#[test]
fn test_profile_updates_are_limited_to_owner_and_admins() {
    let mut persistence: Persistence = setup();
    create_profile(&mut persistence, profile_request("Asha Rao"), &driver()).unwrap();

    assert!(matches!(
        update_profile(
            &mut persistence,
            "driver42",
            profile_request("Someone Else"),
            &other_driver()
        ),
        Err(ApiError::Unauthorized { .. })
    ));

    let updated: ProfileResponse =
        update_profile(&mut persistence, "driver42", profile_request("Asha R."), &admin())
            .unwrap();
    assert_eq!(updated.profile.display_name, "Asha R.");

    let own: ProfileResponse =
        update_profile(&mut persistence, "driver42", profile_request("A. Rao"), &driver())
            .unwrap();
    let stored: Profile = get_profile(&mut persistence, "driver42").unwrap();
    assert_eq!(stored, own.profile);
}

#[test]
fn test_missing_profile_is_not_found() {
    let mut persistence: Persistence = setup();

    assert!(matches!(
        get_profile(&mut persistence, "driver77"),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        update_profile(&mut persistence, "driver77", profile_request("X"), &other_driver()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_admin_assigns_role_with_audit_record() {
    let mut persistence: Persistence = setup();

    let result: ApiResult<AssignRoleResponse> = assign_role(
        &mut persistence,
        &role_request("driver77", "Admin"),
        &admin(),
        cause(),
        now(),
    )
    .unwrap();

    assert_eq!(result.response.role, "admin");
    assert!(result.notifications.is_empty());
    assert_eq!(
        persistence.get_user_role("driver77").unwrap(),
        Some(Role::Admin)
    );

    let event: AuditEvent = persistence.get_audit_event(result.response.event_id).unwrap();
    assert_eq!(event.action.name, "AssignRole");
    assert_eq!(event.before.data, "user=driver77,role=user");
    assert_eq!(event.after.data, "user=driver77,role=admin");
    assert_eq!(event.actor.id, "admin01");
    assert_eq!(event.slot_id, None);
}

#[test]
fn test_role_assignment_validation() {
    let mut persistence: Persistence = setup();

    assert!(matches!(
        assign_role(
            &mut persistence,
            &role_request("driver77", "admin"),
            &driver(),
            cause(),
            now()
        ),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        assign_role(
            &mut persistence,
            &role_request("driver77", "owner"),
            &admin(),
            cause(),
            now()
        ),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
    assert!(matches!(
        assign_role(&mut persistence, &role_request("  ", "user"), &admin(), cause(), now()),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "user_id"
    ));
}

#[test]
fn test_bootstrap_admin_is_idempotent() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert!(ensure_bootstrap_admin(&mut persistence, "owner01").unwrap());
    assert!(!ensure_bootstrap_admin(&mut persistence, "owner01").unwrap());
    assert_eq!(
        persistence.get_user_role("owner01").unwrap(),
        Some(Role::Admin)
    );
    assert!(matches!(
        ensure_bootstrap_admin(&mut persistence, " "),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_usage_summary_covers_history() {
    let mut persistence: Persistence = setup();
    book(&mut persistence, "A1", "driver42");
    book(&mut persistence, "A2", "driver42");
    book(&mut persistence, "B1", "driver77");

    let summary: UsageSummary = get_usage_summary(&mut persistence, &admin()).unwrap();

    assert_eq!(summary.total_bookings, 3);
    assert_eq!(summary.daily_usage.total(), 3);
    assert!(matches!(
        get_usage_summary(&mut persistence, &driver()),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_slot_audit_timeline() {
    let mut persistence: Persistence = setup();
    let booked: ChangeSlotStatusResponse = book(&mut persistence, "K2", "driver42");

    let timeline: AuditTimelineResponse =
        get_slot_audit(&mut persistence, "k2", &admin()).unwrap();

    assert_eq!(timeline.slot_id, "K2");
    assert_eq!(timeline.events.len(), 1);
    assert_eq!(timeline.events[0].event_id, Some(booked.event_id));
    assert_eq!(timeline.events[0].action.name, "ChangeSlotStatus");
    assert!(matches!(
        get_slot_audit(&mut persistence, "K2", &driver()),
        Err(ApiError::Unauthorized { .. })
    ));
}
