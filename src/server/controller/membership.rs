use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::ResponseDto,
        membership::{CreateMembershipDto, MembershipDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::membership::MembershipService,
    },
};

pub static MEMBERSHIP_TAG: &str = "memberships";

/// Purchase a membership
///
/// Rejected while a membership is still active; an expired one is replaced.
#[utoipa::path(
    post,
    path = "/api/memberships",
    tag = MEMBERSHIP_TAG,
    request_body = CreateMembershipDto,
    responses(
        (status = 201, description = "Membership purchased", body = ResponseDto<MembershipDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 409, description = "Membership still active", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_membership(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<CreateMembershipDto>,
) -> Result<impl IntoResponse, Error> {
    let membership_service = MembershipService::new(&state.db);

    let membership = membership_service.purchase(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "Membership purchased",
            MembershipDto::from(membership),
        )),
    )
        .into_response())
}

/// Get the current user's membership
#[utoipa::path(
    get,
    path = "/api/memberships/me",
    tag = MEMBERSHIP_TAG,
    responses(
        (status = 200, description = "Membership retrieved", body = ResponseDto<MembershipDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "User has no membership", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_my_membership(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let membership_service = MembershipService::new(&state.db);

    let membership = membership_service.get_membership(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Membership retrieved",
            MembershipDto::from(membership),
        )),
    )
        .into_response())
}
