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
        comment::{CommentDto, CreateCommentDto, UpdateCommentDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::comment::CommentService,
    },
};

pub static COMMENT_TAG: &str = "comments";

#[derive(Deserialize, IntoParams)]
pub struct CommentListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Restrict the listing to one event
    pub event_id: Option<Uuid>,
}

/// List comments, optionally for a single event
#[utoipa::path(
    get,
    path = "/api/comments",
    tag = COMMENT_TAG,
    params(CommentListQuery),
    responses(
        (status = 200, description = "One page of comments", body = ResponseDto<PaginationDto<CommentDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<CommentListQuery>,
) -> Result<impl IntoResponse, Error> {
    let comment_service = CommentService::new(&state.db);

    let page = query.page.unwrap_or(1).max(1);
    let (comments, total_items) = comment_service
        .get_comments(page, state.config.page_size, query.event_id)
        .await?;

    let items = comments.into_iter().map(CommentDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Comments retrieved", pagination)),
    )
        .into_response())
}

/// Get a comment by id
#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment retrieved", body = ResponseDto<CommentDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Comment not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_comment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let comment_service = CommentService::new(&state.db);

    let comment = comment_service.get_comment(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Comment retrieved",
            CommentDto::from(comment),
        )),
    )
        .into_response())
}

/// Post a comment or a reply on an event
///
/// Replies must target a comment on the same event.
#[utoipa::path(
    post,
    path = "/api/comments",
    tag = COMMENT_TAG,
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment posted", body = ResponseDto<CommentDto>),
        (status = 400, description = "Validation failed or parent on another event", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Event or parent comment not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, Error> {
    let comment_service = CommentService::new(&state.db);

    dto.validate()?;

    let comment = comment_service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "Comment posted",
            CommentDto::from(comment),
        )),
    )
        .into_response())
}

/// Edit a comment's content
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = Uuid, Path, description = "Comment id")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = ResponseDto<CommentDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the author", body = ResponseDto<Object>),
        (status = 404, description = "Comment not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse, Error> {
    let comment_service = CommentService::new(&state.db);

    dto.validate()?;

    let comment = comment_service.update(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Comment updated",
            CommentDto::from(comment),
        )),
    )
        .into_response())
}

/// Delete a comment and its whole reply tree
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    tag = COMMENT_TAG,
    params(("id" = Uuid, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment and replies deleted", body = ResponseDto<u64>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the author", body = ResponseDto<Object>),
        (status = 404, description = "Comment not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let comment_service = CommentService::new(&state.db);

    let deleted = comment_service.delete(id, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Comment and replies deleted", deleted)),
    )
        .into_response())
}
