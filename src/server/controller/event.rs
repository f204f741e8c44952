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
        event::{EventDto, SaveEventDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::event::EventService,
    },
};

pub static EVENT_TAG: &str = "events";

/// List events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of events", body = ResponseDto<PaginationDto<EventDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_events(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, Error> {
    let event_service = EventService::new(&state.db);

    let page = query.page();
    let (events, total_items) = event_service
        .get_events(page, state.config.page_size, query.search_term.as_deref())
        .await?;

    let items = events.into_iter().map(EventDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Events retrieved", pagination)),
    )
        .into_response())
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event retrieved", body = ResponseDto<EventDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Event not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_event(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let event_service = EventService::new(&state.db);

    let event = event_service.get_event(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Event retrieved", EventDto::from(event))),
    )
        .into_response())
}

/// Create an event
///
/// The creator becomes the organizer and is granted the `ORGANIZER` role if
/// they do not hold it yet.
#[utoipa::path(
    post,
    path = "/api/events",
    tag = EVENT_TAG,
    request_body = SaveEventDto,
    responses(
        (status = 201, description = "Event created", body = ResponseDto<EventDto>),
        (status = 400, description = "Validation failed or date not in the future", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Category not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_event(
    State(state): State<AppState>,
    user: AuthUser,
    Json(dto): Json<SaveEventDto>,
) -> Result<impl IntoResponse, Error> {
    let event_service = EventService::new(&state.db);

    dto.validate()?;

    let event = event_service.create(dto, &user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created("Event created", EventDto::from(event))),
    )
        .into_response())
}

/// Edit an event
///
/// Only the organizer or an admin may edit.
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = Uuid, Path, description = "Event id")),
    request_body = SaveEventDto,
    responses(
        (status = 200, description = "Event updated", body = ResponseDto<EventDto>),
        (status = 400, description = "Validation failed or date not in the future", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the organizer", body = ResponseDto<Object>),
        (status = 404, description = "Event or category not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<SaveEventDto>,
) -> Result<impl IntoResponse, Error> {
    let event_service = EventService::new(&state.db);

    dto.validate()?;

    let event = event_service.update(id, dto, &user).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Event updated", EventDto::from(event))),
    )
        .into_response())
}

/// Delete an event along with its comments, attendances and ratings
///
/// Only the organizer or an admin may delete.
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    tag = EVENT_TAG,
    params(("id" = Uuid, Path, description = "Event id")),
    responses(
        (status = 200, description = "Event deleted", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Not the organizer", body = ResponseDto<Object>),
        (status = 404, description = "Event not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_event(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let event_service = EventService::new(&state.db);

    event_service.delete(id, &user).await?;

    Ok((StatusCode::OK, Json(ResponseDto::ok("Event deleted", ()))).into_response())
}
