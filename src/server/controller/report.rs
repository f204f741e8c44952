use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{
        api::{PaginationDto, ResponseDto},
        report::{CreateReportDto, ReportDto, UpdateReportDto},
    },
    server::{
        error::Error,
        model::{
            app::AppState,
            auth::{AuthUser, RequireAdmin},
        },
        service::report::ReportService,
    },
};

pub static REPORT_TAG: &str = "reports";

#[derive(Deserialize, IntoParams)]
pub struct ReportListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Restrict the listing to one organizer
    pub organizer_id: Option<Uuid>,
}

/// List reports (admin only)
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = REPORT_TAG,
    params(ReportListQuery),
    responses(
        (status = 200, description = "One page of reports", body = ResponseDto<PaginationDto<ReportDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_reports(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ReportListQuery>,
) -> Result<impl IntoResponse, Error> {
    let report_service = ReportService::new(&state.db);

    let page = query.page.unwrap_or(1).max(1);
    let (reports, total_items) = report_service
        .get_reports(page, state.config.page_size, query.organizer_id)
        .await?;

    let items = reports.into_iter().map(ReportDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Reports retrieved", pagination)),
    )
        .into_response())
}

/// Get a report by id (admin only)
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report retrieved", body = ResponseDto<ReportDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 404, description = "Report not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_report(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let report_service = ReportService::new(&state.db);

    let report = report_service.get_report(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Report retrieved", ReportDto::from(report))),
    )
        .into_response())
}

/// File a report against an organizer
///
/// One report per reporter and organizer pair.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = REPORT_TAG,
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report filed", body = ResponseDto<ReportDto>),
        (status = 400, description = "Validation failed or self-report", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Organizer not found", body = ResponseDto<Object>),
        (status = 409, description = "Already reported this organizer", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<CreateReportDto>,
) -> Result<impl IntoResponse, Error> {
    let report_service = ReportService::new(&state.db);

    dto.validate()?;

    let report = report_service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created("Report filed", ReportDto::from(report))),
    )
        .into_response())
}

/// Edit a report's reason
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = Uuid, Path, description = "Report id")),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ResponseDto<ReportDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the reporter", body = ResponseDto<Object>),
        (status = 404, description = "Report not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateReportDto>,
) -> Result<impl IntoResponse, Error> {
    let report_service = ReportService::new(&state.db);

    dto.validate()?;

    let report = report_service.update(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Report updated", ReportDto::from(report))),
    )
        .into_response())
}

/// Withdraw a report
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = REPORT_TAG,
    params(("id" = Uuid, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report withdrawn", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the reporter", body = ResponseDto<Object>),
        (status = 404, description = "Report not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let report_service = ReportService::new(&state.db);

    report_service.delete(id, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Report withdrawn", ())),
    )
        .into_response())
}
