use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{api::ResponseDto, dashboard::DashboardDto},
    server::{
        error::Error,
        model::{app::AppState, auth::RequireAdmin},
        service::dashboard::DashboardService,
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Platform overview for administrators
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Overview retrieved", body = ResponseDto<DashboardDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse, Error> {
    let dashboard_service = DashboardService::new(&state.db);

    let overview = dashboard_service.get_overview().await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Overview retrieved", overview)),
    )
        .into_response())
}
