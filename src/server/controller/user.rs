use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    model::{
        api::{PaginationDto, PaginationQuery, ResponseDto},
        user::{CreateUserDto, UpdateUserDto, UserDto},
    },
    server::{
        error::Error,
        model::{
            app::AppState,
            auth::{AuthUser, RequireAdmin},
        },
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "users";

/// List users (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of users", body = ResponseDto<PaginationDto<UserDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    let page = query.page();
    let (users, total_items) = user_service
        .get_users(page, state.config.page_size, query.search_term.as_deref())
        .await?;

    let items = users
        .into_iter()
        .map(|(user, roles)| UserDto::from_model(user, roles))
        .collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Users retrieved", pagination)),
    )
        .into_response())
}

/// Create a user with an explicit role (admin only)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ResponseDto<UserDto>),
        (status = 400, description = "Validation failed or unknown role", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 409, description = "Email is already registered", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(dto): Json<CreateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    dto.validate()?;

    let (user, roles) = user_service.create_user(dto, &admin).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "User created",
            UserDto::from_model(user, roles),
        )),
    )
        .into_response())
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User retrieved", body = ResponseDto<UserDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "User not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    let (user, roles) = user_service.get_user(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "User retrieved",
            UserDto::from_model(user, roles),
        )),
    )
        .into_response())
}

/// Update a user's profile
///
/// Users may edit their own profile; admins may edit anyone's.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ResponseDto<UserDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the account owner", body = ResponseDto<Object>),
        (status = 404, description = "User not found", body = ResponseDto<Object>),
        (status = 409, description = "Email is already registered", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    dto.validate()?;

    let (updated, roles) = user_service.update_user(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "User updated",
            UserDto::from_model(updated, roles),
        )),
    )
        .into_response())
}

/// Toggle a user's blocked flag (admin only)
#[utoipa::path(
    put,
    path = "/api/users/block/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Block flag toggled", body = ResponseDto<UserDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 404, description = "User not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn toggle_block(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    let user = user_service.toggle_block(id, &admin).await?;
    let message = if user.is_blocked {
        "User blocked"
    } else {
        "User unblocked"
    };
    let (user, roles) = user_service.get_user(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(message, UserDto::from_model(user, roles))),
    )
        .into_response())
}

/// Delete a user and everything they own
///
/// Users may delete their own account; admins may delete anyone's.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the account owner", body = ResponseDto<Object>),
        (status = 404, description = "User not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user_service = UserService::new(&state.db);

    if !user.can_act_for(id) {
        return Err(Error::Forbidden(
            "Only the account owner may delete it".to_string(),
        ));
    }

    user_service.delete_user(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("User deleted", ())),
    )
        .into_response())
}
