use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AchievementCandidate, ActorId, RecordId, ReviewOutcome};
use super::repository::{ActorDirectory, NotificationStore, RecordRepository};
use super::service::{AchievementService, AchievementServiceError};
use super::visibility::RecordQuery;

type SharedService<R, D, N> = Arc<AchievementService<R, D, N>>;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub actor_id: ActorId,
    pub candidate: AchievementCandidate,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub actor_id: ActorId,
    pub outcome: ReviewOutcome,
    #[serde(default)]
    pub note: Option<String>,
}

/// Router builder exposing HTTP endpoints for submission, review and reporting.
pub fn achievement_router<R, D, N>(service: SharedService<R, D, N>) -> Router
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    Router::new()
        .route("/api/v1/achievements", post(submit_handler::<R, D, N>))
        .route(
            "/api/v1/achievements/:record_id/decision",
            post(decision_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/achievements",
            get(visible_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/achievements/by-owner",
            get(owner_groups_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/achievements/by-event",
            get(event_groups_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/review-queue",
            get(review_queue_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/dashboard",
            get(dashboard_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/report",
            get(report_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/notifications",
            get(notifications_handler::<R, D, N>),
        )
        .route(
            "/api/v1/actors/:actor_id/notifications/read",
            post(mark_read_handler::<R, D, N>),
        )
        .with_state(service)
}

fn error_response(error: AchievementServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (error.status_code(), axum::Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, AchievementServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(
        StatusCode::CREATED,
        service.submit(request.candidate, &request.actor_id),
    )
}

pub(crate) async fn decision_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(record_id): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(
        StatusCode::OK,
        service.decide(
            &RecordId(record_id),
            &request.actor_id,
            request.outcome,
            request.note,
        ),
    )
}

pub(crate) async fn visible_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(StatusCode::OK, service.search(&ActorId(actor_id), &query))
}

pub(crate) async fn owner_groups_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(
        StatusCode::OK,
        service.owner_groups(&ActorId(actor_id), &query),
    )
}

pub(crate) async fn event_groups_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(
        StatusCode::OK,
        service.event_groups(&ActorId(actor_id), &query),
    )
}

pub(crate) async fn review_queue_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(StatusCode::OK, service.list_review_queue(&ActorId(actor_id)))
}

pub(crate) async fn dashboard_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(StatusCode::OK, service.dashboard(&ActorId(actor_id)))
}

pub(crate) async fn report_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(StatusCode::OK, service.generate_report(&ActorId(actor_id)))
}

pub(crate) async fn notifications_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    respond(
        StatusCode::OK,
        service.list_notifications(&ActorId(actor_id)),
    )
}

pub(crate) async fn mark_read_handler<R, D, N>(
    State(service): State<SharedService<R, D, N>>,
    Path(actor_id): Path<String>,
) -> Response
where
    R: RecordRepository + 'static,
    D: ActorDirectory + 'static,
    N: NotificationStore + 'static,
{
    match service.mark_all_read(&ActorId(actor_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}
