use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    AppointmentId, AppointmentType, ClientId, ReminderChannel, ReminderId, SessionId, StaffId,
};
use super::repository::{ProfileStore, ReminderDispatcher, RepositoryError};
use super::service::{IntakeService, IntakeServiceError};

/// Router builder exposing the intake workflow over HTTP.
pub fn intake_router<R, D>(service: Arc<IntakeService<R, D>>) -> Router
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/intake/sessions", post(start_session_handler::<R, D>))
        .route(
            "/api/v1/intake/sessions/:session_id/responses",
            post(record_response_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id",
            get(client_status_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/checklist",
            get(get_checklist_handler::<R, D>).post(generate_checklist_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/documents/:document_id/collect",
            post(collect_document_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/recommendation",
            get(recommendation_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/assignment",
            post(assignment_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/appointment-estimate",
            get(estimate_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/clients/:client_id/reminders",
            post(document_reminders_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/appointments",
            post(create_appointment_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/appointments/:appointment_id/reminder",
            post(appointment_reminder_handler::<R, D>),
        )
        .route(
            "/api/v1/intake/reminders/:reminder_id/send",
            post(send_reminder_handler::<R, D>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartIntakeRequest {
    #[serde(default)]
    pub(crate) client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordResponseRequest {
    pub(crate) answer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAppointmentRequest {
    pub(crate) client_id: String,
    pub(crate) staff_id: String,
    pub(crate) scheduled_at: DateTime<Utc>,
    pub(crate) kind: AppointmentType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComposeRemindersRequest {
    #[serde(default = "default_channel")]
    pub(crate) channel: ReminderChannel,
}

fn default_channel() -> ReminderChannel {
    ReminderChannel::Email
}

pub(crate) async fn start_session_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    axum::Json(request): axum::Json<StartIntakeRequest>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    let client_id = request.client_id.map(ClientId);
    match service.start_intake(client_id) {
        Ok(started) => (StatusCode::CREATED, axum::Json(started)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn record_response_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(session_id): Path<String>,
    axum::Json(request): axum::Json<RecordResponseRequest>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.record_response(&SessionId(session_id), &request.answer) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn client_status_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.client_status(&ClientId(client_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn generate_checklist_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.generate_checklist(&ClientId(client_id)) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_checklist_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.checklist(&ClientId(client_id)) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn collect_document_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path((client_id, document_id)): Path<(String, String)>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.mark_document_collected(&ClientId(client_id), &document_id) {
        Ok(checklist) => (StatusCode::OK, axum::Json(checklist)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendation_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.recommend_tax_pro(&ClientId(client_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assignment_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.route_client(&ClientId(client_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn estimate_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.appointment_estimate(&ClientId(client_id)) {
        Ok(estimate) => (StatusCode::OK, axum::Json(estimate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_appointment_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    axum::Json(request): axum::Json<CreateAppointmentRequest>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.create_appointment(
        &ClientId(request.client_id),
        &StaffId(request.staff_id),
        request.scheduled_at,
        request.kind,
    ) {
        Ok(appointment) => (StatusCode::CREATED, axum::Json(appointment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn document_reminders_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(client_id): Path<String>,
    axum::Json(request): axum::Json<ComposeRemindersRequest>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.compose_document_reminders(&ClientId(client_id), request.channel) {
        Ok(reminders) => (StatusCode::CREATED, axum::Json(reminders)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn appointment_reminder_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(appointment_id): Path<String>,
    axum::Json(request): axum::Json<ComposeRemindersRequest>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.compose_appointment_reminder(&AppointmentId(appointment_id), request.channel) {
        Ok(reminder) => (StatusCode::CREATED, axum::Json(reminder)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn send_reminder_handler<R, D>(
    State(service): State<Arc<IntakeService<R, D>>>,
    Path(reminder_id): Path<String>,
) -> Response
where
    R: ProfileStore + 'static,
    D: ReminderDispatcher + 'static,
{
    match service.send_reminder(&ReminderId(reminder_id)) {
        Ok(reminder) => (StatusCode::OK, axum::Json(reminder)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: IntakeServiceError) -> Response {
    let status = match &error {
        IntakeServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        IntakeServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        IntakeServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        IntakeServiceError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
        IntakeServiceError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
