// Copyright (C) 2026 The ParkIt Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use parkit_analytics::UsageSummary;
use parkit_api::{
    ApiError, ApiResult, AssignRoleRequest, AssignRoleResponse, AuditTimelineResponse,
    AuthenticatedActor, AuthenticationService, ChangeSlotStatusRequest, ChangeSlotStatusResponse,
    DeleteIssueResponse, IssueResponse, NotificationListResponse, ProfileRequest,
    ProfileResponse, ReportIssueRequest, ReservationResponse, ReservationSubmission, SlotView,
    UpdateIssueStatusRequest, generate_id,
};
use parkit_audit::Cause;
use parkit_domain::{Booking, FieldError, Issue, Notification, Profile, ReservationRequest};
use parkit_persistence::Persistence;
use parkit_push::{
    DEFAULT_BASE_URL, DEFAULT_SEGMENT, PushClient, PushConfig, PushError, PushMessage, PushRelay,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Header carrying the caller's custom user id.
const USER_HEADER: &str = "x-parkit-user";

/// Optional header carrying a client-supplied request id for the audit log.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// `ParkIt` Server - HTTP and live event server for the parking lot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "PARKIT_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "PARKIT_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "PARKIT_PORT", default_value_t = 3000)]
    port: u16,

    /// Push service application id
    #[arg(long, env = "PARKIT_PUSH_APP_ID")]
    push_app_id: Option<String>,

    /// Push service REST API key
    #[arg(long, env = "PARKIT_PUSH_API_KEY", hide_env_values = true)]
    push_api_key: Option<String>,

    /// Push service base URL
    #[arg(long, env = "PARKIT_PUSH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    push_base_url: String,

    /// Push segment that broadcasts are addressed to
    #[arg(long, env = "PARKIT_PUSH_SEGMENT", default_value = DEFAULT_SEGMENT)]
    push_segment: String,

    /// Custom user id granted the admin role at startup
    #[arg(long, env = "PARKIT_BOOTSTRAP_ADMIN")]
    bootstrap_admin: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The store, serialized behind a mutex so every transition validates
    /// against the current stored state.
    persistence: Arc<Mutex<Persistence>>,
    /// Relay for stored notifications.
    push: PushClient,
    /// Live snapshot broadcaster.
    live: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(persistence: Persistence, push: PushClient) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            push,
            live: Arc::new(LiveEventBroadcaster::new()),
        }
    }

    /// Publishes the outcome of a mutation: a fresh lot snapshot to live
    /// observers and the stored notifications to the push relay.
    fn publish(&self, persistence: &mut Persistence, notifications: Vec<Notification>) {
        match parkit_api::list_slots(persistence) {
            Ok(slots) => self.live.broadcast(&LiveEvent::SlotsSnapshot { slots }),
            Err(e) => warn!(error = %e, "Failed to load lot snapshot for live observers"),
        }
        self.relay(notifications);
    }

    /// Relays notifications on a background task. Failures are logged and
    /// never reach the caller; the records are already stored.
    fn relay(&self, notifications: Vec<Notification>) {
        if notifications.is_empty() {
            return;
        }
        if !self.push.is_enabled() {
            debug!(
                count = notifications.len(),
                "Push relay disabled, notifications stored only"
            );
            return;
        }

        let push: PushClient = self.push.clone();
        tokio::spawn(async move {
            for notification in &notifications {
                let message: PushMessage = PushMessage::from_notification(notification);
                match push.send(&message).await {
                    Ok(receipt) => debug!(
                        notification_id = %notification.id,
                        recipients = ?receipt.recipients,
                        "Relayed notification"
                    ),
                    Err(PushError::NotConfigured) => {}
                    Err(e) => warn!(
                        notification_id = %notification.id,
                        error = %e,
                        "Push relay failed"
                    ),
                }
            }
        });
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.live)
    }
}

/// Query for filtering reservation requests.
#[derive(Debug, Deserialize)]
struct ReservationQuery {
    /// `Pending`, `Approved` or `Rejected`.
    status: Option<String>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Offending booking form fields, when a form was rejected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldError>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
    fields: Vec<FieldError>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            fields: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            fields: self.fields,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, message),
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::InvalidForm { fields } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                fields,
            },
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, message),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

/// Resolves the caller from the user id header.
fn authenticate(
    persistence: &mut Persistence,
    headers: &HeaderMap,
) -> Result<AuthenticatedActor, HttpError> {
    let user_id: Option<&str> = headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok());
    AuthenticationService::authenticate(persistence, user_id)
        .map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Builds the audit cause for a request, preferring a client-supplied id.
fn cause_for(headers: &HeaderMap, operation: &str, now: OffsetDateTime) -> Cause {
    let id: String = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| generate_id("http", now), ToString::to_string);
    Cause::new(id, format!("HTTP {operation}"))
}

// ============================================================================
// Slots and bookings
// ============================================================================

/// Handler for GET `/slots`.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SlotView>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_slots(&mut persistence)?))
}

/// Handler for GET `/slots/{slot_id}`.
async fn handle_get_slot(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(slot_id): Path<String>,
) -> Result<Json<SlotView>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::get_slot(&mut persistence, &slot_id)?))
}

/// Handler for POST `/slots/{slot_id}/status`.
async fn handle_change_slot_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(slot_id): Path<String>,
    Json(req): Json<ChangeSlotStatusRequest>,
) -> Result<Json<ChangeSlotStatusResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(
        actor_id = %actor.id,
        slot_id = %slot_id,
        status = %req.status,
        "Handling change_slot_status request"
    );

    let result: ApiResult<ChangeSlotStatusResponse> = parkit_api::change_slot_status(
        &mut persistence,
        &slot_id,
        req,
        &actor,
        cause_for(&headers, "change_slot_status", now),
        now,
    )?;
    app_state.publish(&mut persistence, result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for GET `/bookings`.
async fn handle_list_active_bookings(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_active_bookings(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for GET `/bookings/history`.
async fn handle_list_booking_history(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_booking_history(
        &mut persistence,
        &actor,
    )?))
}

// ============================================================================
// Reservation requests
// ============================================================================

/// Handler for POST `/reservations`.
async fn handle_submit_reservation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReservationSubmission>,
) -> Result<Json<ReservationResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(
        actor_id = %actor.id,
        slot_id = %req.slot_id,
        "Handling submit_reservation request"
    );

    let result: ApiResult<ReservationResponse> = parkit_api::submit_reservation(
        &mut persistence,
        req,
        &actor,
        cause_for(&headers, "submit_reservation", now),
        now,
    )?;
    app_state.publish(&mut persistence, result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for GET `/reservations`.
async fn handle_list_reservations(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<Vec<ReservationRequest>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_reservations(
        &mut persistence,
        query.status.as_deref(),
        &actor,
    )?))
}

/// Handler for POST `/reservations/{request_id}/approve`.
async fn handle_approve_reservation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
) -> Result<Json<ReservationResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(actor_id = %actor.id, request_id = %request_id, "Handling approve_reservation request");

    let result: ApiResult<ReservationResponse> = parkit_api::approve_reservation(
        &mut persistence,
        &request_id,
        &actor,
        cause_for(&headers, "approve_reservation", now),
        now,
    )?;
    app_state.publish(&mut persistence, result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for POST `/reservations/{request_id}/reject`.
async fn handle_reject_reservation(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(request_id): Path<String>,
) -> Result<Json<ReservationResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(actor_id = %actor.id, request_id = %request_id, "Handling reject_reservation request");

    let result: ApiResult<ReservationResponse> = parkit_api::reject_reservation(
        &mut persistence,
        &request_id,
        &actor,
        cause_for(&headers, "reject_reservation", now),
        now,
    )?;
    app_state.publish(&mut persistence, result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

// ============================================================================
// Issues
// ============================================================================

/// Handler for POST `/issues`.
async fn handle_report_issue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReportIssueRequest>,
) -> Result<Json<IssueResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(
        actor_id = %actor.id,
        slot_id = %req.slot_id,
        issue_type = %req.issue_type,
        "Handling report_issue request"
    );

    let result: ApiResult<IssueResponse> = parkit_api::report_issue(
        &mut persistence,
        req,
        &actor,
        cause_for(&headers, "report_issue", now),
        now,
    )?;
    app_state.relay(result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for GET `/issues`.
async fn handle_list_issues(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Issue>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_issues(&mut persistence, &actor)?))
}

/// Handler for POST `/issues/{issue_id}/status`.
async fn handle_update_issue_status(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(issue_id): Path<String>,
    Json(req): Json<UpdateIssueStatusRequest>,
) -> Result<Json<IssueResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(
        actor_id = %actor.id,
        issue_id = %issue_id,
        status = %req.status,
        "Handling update_issue_status request"
    );

    let result: ApiResult<IssueResponse> = parkit_api::update_issue_status(
        &mut persistence,
        &issue_id,
        &req,
        &actor,
        cause_for(&headers, "update_issue_status", now),
        now,
    )?;
    app_state.relay(result.notifications);
    drop(persistence);

    Ok(Json(result.response))
}

/// Handler for DELETE `/issues/{issue_id}`.
async fn handle_delete_issue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(issue_id): Path<String>,
) -> Result<Json<DeleteIssueResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(actor_id = %actor.id, issue_id = %issue_id, "Handling delete_issue request");

    let result: ApiResult<DeleteIssueResponse> = parkit_api::delete_issue(
        &mut persistence,
        &issue_id,
        &actor,
        cause_for(&headers, "delete_issue", now),
        now,
    )?;
    drop(persistence);

    Ok(Json(result.response))
}

// ============================================================================
// Notifications
// ============================================================================

/// Handler for GET `/notifications`.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<NotificationListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::list_notifications(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for POST `/notifications/{notification_id}/read`.
async fn handle_mark_notification_read(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Result<Json<Notification>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::mark_notification_read(
        &mut persistence,
        &notification_id,
        &actor,
    )?))
}

// ============================================================================
// Profiles and roles
// ============================================================================

/// Handler for POST `/profiles`.
async fn handle_create_profile(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::create_profile(
        &mut persistence,
        req,
        &actor,
    )?))
}

/// Handler for GET `/profiles/{profile_id}`.
async fn handle_get_profile(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(profile_id): Path<String>,
) -> Result<Json<Profile>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::get_profile(&mut persistence, &profile_id)?))
}

/// Handler for PUT `/profiles/{profile_id}`.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(profile_id): Path<String>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::update_profile(
        &mut persistence,
        &profile_id,
        req,
        &actor,
    )?))
}

/// Handler for POST `/roles`.
async fn handle_assign_role(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<AssignRoleRequest>,
) -> Result<Json<AssignRoleResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;

    info!(
        actor_id = %actor.id,
        user_id = %req.user_id,
        role = %req.role,
        "Handling assign_role request"
    );

    let result: ApiResult<AssignRoleResponse> = parkit_api::assign_role(
        &mut persistence,
        &req,
        &actor,
        cause_for(&headers, "assign_role", now),
        now,
    )?;
    drop(persistence);

    Ok(Json(result.response))
}

// ============================================================================
// Analytics and audit
// ============================================================================

/// Handler for GET `/analytics/summary`.
async fn handle_usage_summary(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<UsageSummary>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::get_usage_summary(
        &mut persistence,
        &actor,
    )?))
}

/// Handler for GET `/audit/slots/{slot_id}`.
async fn handle_slot_audit(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(slot_id): Path<String>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let actor: AuthenticatedActor = authenticate(&mut persistence, &headers)?;
    Ok(Json(parkit_api::get_slot_audit(
        &mut persistence,
        &slot_id,
        &actor,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/slots", get(handle_list_slots))
        .route("/slots/{slot_id}", get(handle_get_slot))
        .route("/slots/{slot_id}/status", post(handle_change_slot_status))
        .route("/bookings", get(handle_list_active_bookings))
        .route("/bookings/history", get(handle_list_booking_history))
        .route(
            "/reservations",
            post(handle_submit_reservation).get(handle_list_reservations),
        )
        .route(
            "/reservations/{request_id}/approve",
            post(handle_approve_reservation),
        )
        .route(
            "/reservations/{request_id}/reject",
            post(handle_reject_reservation),
        )
        .route("/issues", post(handle_report_issue).get(handle_list_issues))
        .route("/issues/{issue_id}", delete(handle_delete_issue))
        .route("/issues/{issue_id}/status", post(handle_update_issue_status))
        .route("/notifications", get(handle_list_notifications))
        .route(
            "/notifications/{notification_id}/read",
            post(handle_mark_notification_read),
        )
        .route("/profiles", post(handle_create_profile))
        .route(
            "/profiles/{profile_id}",
            get(handle_get_profile).put(handle_update_profile),
        )
        .route("/roles", post(handle_assign_role))
        .route("/analytics/summary", get(handle_usage_summary))
        .route("/audit/slots/{slot_id}", get(handle_slot_audit))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing ParkIt server");

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let seeded: usize = persistence.seed_slots_if_empty()?;
    if seeded > 0 {
        info!(seeded, "Seeded lot layout");
    }

    if let Some(admin_id) = &args.bootstrap_admin {
        parkit_api::ensure_bootstrap_admin(&mut persistence, admin_id)?;
    }

    let push_config: Option<PushConfig> = PushConfig::from_parts(
        args.push_app_id.clone(),
        args.push_api_key.clone(),
        &args.push_base_url,
        &args.push_segment,
    );
    if push_config.is_none() {
        info!("Push relay disabled: app id or api key not configured");
    }

    let app_state: AppState = AppState::new(persistence, PushClient::from_config(push_config));
    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
