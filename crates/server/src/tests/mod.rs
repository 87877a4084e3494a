// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use parkit_domain::Role;
use parkit_persistence::Persistence;
use parkit_push::PushClient;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, build_router};

/// App state over a seeded in-memory lot with one admin and two drivers.
pub fn create_test_app_state() -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence.seed_slots_if_empty().unwrap();
    persistence.set_user_role("admin01", Role::Admin).unwrap();
    persistence.set_user_role("driver42", Role::User).unwrap();
    persistence.set_user_role("driver77", Role::User).unwrap();
    AppState::new(persistence, PushClient::from_config(None))
}

pub fn booking_json(user_id: &str) -> Value {
    json!({
        "vehicle_number": "KA01AB1234",
        "vehicle_type": "Car",
        "user_id": user_id,
        "user_name": "Asha Rao",
        "contact_number": "9876543210",
        "date": "2026-03-02",
        "start_time": "10:00",
        "end_time": "12:00",
        "priority": "Normal"
    })
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-parkit-user", user);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

pub fn app() -> (AppState, Router) {
    let app_state: AppState = create_test_app_state();
    let router: Router = build_router(app_state.clone());
    (app_state, router)
}
