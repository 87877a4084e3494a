// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use parkit_domain::{Audience, Notification, NotificationDraft, NotificationKind};
use serde_json::json;
use time::OffsetDateTime;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::message::PushRequestBody;
use crate::{
    DEFAULT_BASE_URL, DisabledPushRelay, HttpPushRelay, PushClient, PushConfig, PushError,
    PushMessage, PushReceipt, PushRelay,
};

fn config_for(server: &MockServer) -> PushConfig {
    PushConfig::from_parts(
        Some(String::from("app-123")),
        Some(String::from("secret-key")),
        &server.uri(),
        "Subscribed Users",
    )
    .unwrap()
}

fn targeted() -> PushMessage {
    PushMessage::from_draft(&NotificationDraft::to_user(
        "driver42",
        "Booking Confirmed",
        String::from("Your booking for slot A1 in Zone A is confirmed."),
        NotificationKind::BookingConfirmed,
    ))
}

fn broadcast() -> PushMessage {
    PushMessage::from_draft(&NotificationDraft::broadcast(
        "Slot Under Maintenance",
        String::from("Slot B2 in Zone B is under maintenance and cannot be booked."),
        NotificationKind::Maintenance,
    ))
}

#[test]
fn test_config_requires_both_credentials() {
    let key: Option<String> = Some(String::from("k"));
    assert!(PushConfig::from_parts(None, key.clone(), DEFAULT_BASE_URL, "s").is_none());
    assert!(PushConfig::from_parts(Some(String::from(" ")), key, DEFAULT_BASE_URL, "s").is_none());
    let config: PushConfig = PushConfig::from_parts(
        Some(String::from("a")),
        Some(String::from("k")),
        "https://push.example.com/api/v1/",
        "s",
    )
    .unwrap();
    assert_eq!(config.base_url, "https://push.example.com/api/v1");
}

#[test]
fn test_stored_notification_keeps_its_audience() {
    let draft: NotificationDraft = NotificationDraft::to_user(
        "driver42",
        "Reservation Approved",
        String::from("Your reservation for slot C3 in Zone C has been approved."),
        NotificationKind::ReservationApproved,
    );
    let stored: Notification =
        Notification::from_draft(String::from("ntf-1"), &draft, OffsetDateTime::UNIX_EPOCH);

    let message: PushMessage = PushMessage::from_notification(&stored);

    assert_eq!(message, PushMessage::from_draft(&draft));
    assert_eq!(message.audience, Audience::User(String::from("driver42")));
}

#[test]
fn test_targeted_body_uses_external_user_id() {
    let message: PushMessage = targeted();
    let body = serde_json::to_value(PushRequestBody::new("app-123", "Subscribed Users", &message))
        .unwrap();

    assert_eq!(body["include_external_user_ids"], json!(["driver42"]));
    assert!(body.get("included_segments").is_none());
    assert_eq!(body["headings"]["en"], "Booking Confirmed");
    assert_eq!(body["data"]["type"], "booking_confirmed");
    assert_eq!(body["priority"], 10);
}

#[test]
fn test_broadcast_body_uses_segment() {
    let message: PushMessage = broadcast();
    let body = serde_json::to_value(PushRequestBody::new("app-123", "Subscribed Users", &message))
        .unwrap();

    assert_eq!(body["included_segments"], json!(["Subscribed Users"]));
    assert!(body.get("include_external_user_ids").is_none());
}

#[tokio::test]
async fn test_http_relay_posts_targeted_message() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications"))
        .and(header("Authorization", "Basic secret-key"))
        .and(body_partial_json(json!({
            "app_id": "app-123",
            "include_external_user_ids": ["driver42"],
            "contents": { "en": "Your booking for slot A1 in Zone A is confirmed." }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "n-1", "recipients": 1 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let relay: HttpPushRelay = HttpPushRelay::new(config_for(&server));
    let receipt: PushReceipt = relay.send(&targeted()).await.unwrap();

    assert_eq!(receipt.id.as_deref(), Some("n-1"));
    assert_eq!(receipt.recipients, Some(1));
}

#[tokio::test]
async fn test_http_relay_posts_broadcast_to_segment() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/notifications"))
        .and(body_partial_json(json!({
            "included_segments": ["Subscribed Users"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "n-2" })))
        .expect(1)
        .mount(&server)
        .await;

    let client: PushClient = PushClient::from_config(Some(config_for(&server)));
    assert!(client.is_enabled());

    let receipt: PushReceipt = client.send(&broadcast()).await.unwrap();
    assert_eq!(receipt.recipients, None);
}

#[tokio::test]
async fn test_http_relay_reports_rejected_key() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let relay: HttpPushRelay = HttpPushRelay::new(config_for(&server));

    assert!(matches!(
        relay.send(&targeted()).await,
        Err(PushError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_http_relay_reports_service_errors() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid app_id"))
        .mount(&server)
        .await;

    let relay: HttpPushRelay = HttpPushRelay::new(config_for(&server));

    match relay.send(&targeted()).await {
        Err(PushError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "invalid app_id");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_disabled_relay_never_sends() {
    let client: PushClient = PushClient::from_config(None);
    assert!(!client.is_enabled());

    assert!(matches!(
        DisabledPushRelay.send(&broadcast()).await,
        Err(PushError::NotConfigured)
    ));
    assert!(matches!(
        client.send(&broadcast()).await,
        Err(PushError::NotConfigured)
    ));
}
