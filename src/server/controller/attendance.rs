use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    model::{
        api::{PaginationDto, ResponseDto},
        attendance::{AttendanceDto, CreateAttendanceDto, UpdateAttendanceDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::attendance::AttendanceService,
    },
};

pub static ATTENDANCE_TAG: &str = "attendances";

#[derive(Deserialize, IntoParams)]
pub struct AttendanceListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Restrict the listing to one event
    pub event_id: Option<Uuid>,
}

/// List attendances, optionally for a single event
#[utoipa::path(
    get,
    path = "/api/attendances",
    tag = ATTENDANCE_TAG,
    params(AttendanceListQuery),
    responses(
        (status = 200, description = "One page of attendances", body = ResponseDto<PaginationDto<AttendanceDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_attendances(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<AttendanceListQuery>,
) -> Result<impl IntoResponse, Error> {
    let attendance_service = AttendanceService::new(&state.db);

    let page = query.page.unwrap_or(1).max(1);
    let (attendances, total_items) = attendance_service
        .get_attendances(page, state.config.page_size, query.event_id)
        .await?;

    let items = attendances.into_iter().map(AttendanceDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Attendances retrieved", pagination)),
    )
        .into_response())
}

/// Get an attendance by id
#[utoipa::path(
    get,
    path = "/api/attendances/{id}",
    tag = ATTENDANCE_TAG,
    params(("id" = Uuid, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance retrieved", body = ResponseDto<AttendanceDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Attendance not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_attendance(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let attendance_service = AttendanceService::new(&state.db);

    let attendance = attendance_service.get_attendance(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Attendance retrieved",
            AttendanceDto::from(attendance),
        )),
    )
        .into_response())
}

/// Register the current user for an event
#[utoipa::path(
    post,
    path = "/api/attendances",
    tag = ATTENDANCE_TAG,
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance registered", body = ResponseDto<AttendanceDto>),
        (status = 400, description = "Event has already taken place", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Event not found", body = ResponseDto<Object>),
        (status = 409, description = "Already registered for this event", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<CreateAttendanceDto>,
) -> Result<impl IntoResponse, Error> {
    let attendance_service = AttendanceService::new(&state.db);

    let attendance = attendance_service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "Attendance registered",
            AttendanceDto::from(attendance),
        )),
    )
        .into_response())
}

/// Change the state of an attendance
#[utoipa::path(
    put,
    path = "/api/attendances/{id}",
    tag = ATTENDANCE_TAG,
    params(("id" = Uuid, Path, description = "Attendance id")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = ResponseDto<AttendanceDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the attendee", body = ResponseDto<Object>),
        (status = 404, description = "Attendance not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateAttendanceDto>,
) -> Result<impl IntoResponse, Error> {
    let attendance_service = AttendanceService::new(&state.db);

    let attendance = attendance_service.update(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Attendance updated",
            AttendanceDto::from(attendance),
        )),
    )
        .into_response())
}

/// Withdraw an attendance
#[utoipa::path(
    delete,
    path = "/api/attendances/{id}",
    tag = ATTENDANCE_TAG,
    params(("id" = Uuid, Path, description = "Attendance id")),
    responses(
        (status = 200, description = "Attendance removed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the attendee", body = ResponseDto<Object>),
        (status = 404, description = "Attendance not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let attendance_service = AttendanceService::new(&state.db);

    attendance_service.delete(id, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Attendance removed", ())),
    )
        .into_response())
}
