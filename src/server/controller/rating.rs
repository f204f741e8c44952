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
        rating::{CreateRatingDto, RatingDto, UpdateRatingDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::rating::RatingService,
    },
};

pub static RATING_TAG: &str = "ratings";

#[derive(Deserialize, IntoParams)]
pub struct RatingListQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Restrict the listing to one organizer
    pub organizer_id: Option<Uuid>,
}

/// List ratings, optionally for a single organizer
#[utoipa::path(
    get,
    path = "/api/ratings",
    tag = RATING_TAG,
    params(RatingListQuery),
    responses(
        (status = 200, description = "One page of ratings", body = ResponseDto<PaginationDto<RatingDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_ratings(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RatingListQuery>,
) -> Result<impl IntoResponse, Error> {
    let rating_service = RatingService::new(&state.db);

    let page = query.page.unwrap_or(1).max(1);
    let (ratings, total_items) = rating_service
        .get_ratings(page, state.config.page_size, query.organizer_id)
        .await?;

    let items = ratings.into_iter().map(RatingDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Ratings retrieved", pagination)),
    )
        .into_response())
}

/// Get a rating by id
#[utoipa::path(
    get,
    path = "/api/ratings/{id}",
    tag = RATING_TAG,
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating retrieved", body = ResponseDto<RatingDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Rating not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_rating(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let rating_service = RatingService::new(&state.db);

    let rating = rating_service.get_rating(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Rating retrieved", RatingDto::from(rating))),
    )
        .into_response())
}

/// Rate an organizer for an attended event
///
/// Opens once the event date has passed; one rating per rater, organizer and
/// event combination.
#[utoipa::path(
    post,
    path = "/api/ratings",
    tag = RATING_TAG,
    request_body = CreateRatingDto,
    responses(
        (status = 201, description = "Rating recorded", body = ResponseDto<RatingDto>),
        (status = 400, description = "Rating rules violated", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Organizer or event not found", body = ResponseDto<Object>),
        (status = 409, description = "Already rated this organizer for this event", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<CreateRatingDto>,
) -> Result<impl IntoResponse, Error> {
    let rating_service = RatingService::new(&state.db);

    dto.validate()?;

    let rating = rating_service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "Rating recorded",
            RatingDto::from(rating),
        )),
    )
        .into_response())
}

/// Change a rating's score
#[utoipa::path(
    put,
    path = "/api/ratings/{id}",
    tag = RATING_TAG,
    params(("id" = Uuid, Path, description = "Rating id")),
    request_body = UpdateRatingDto,
    responses(
        (status = 200, description = "Rating updated", body = ResponseDto<RatingDto>),
        (status = 400, description = "Score out of range", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the rater", body = ResponseDto<Object>),
        (status = 404, description = "Rating not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateRatingDto>,
) -> Result<impl IntoResponse, Error> {
    let rating_service = RatingService::new(&state.db);

    dto.validate()?;

    let rating = rating_service.update(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Rating updated", RatingDto::from(rating))),
    )
        .into_response())
}

/// Delete a rating
#[utoipa::path(
    delete,
    path = "/api/ratings/{id}",
    tag = RATING_TAG,
    params(("id" = Uuid, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating deleted", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the rater", body = ResponseDto<Object>),
        (status = 404, description = "Rating not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let rating_service = RatingService::new(&state.db);

    rating_service.delete(id, &user).await?;

    Ok((StatusCode::OK, Json(ResponseDto::ok("Rating deleted", ()))).into_response())
}
