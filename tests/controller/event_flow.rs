//! End-to-end flow across categories, events, attendance and ratings.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{TimeDelta, Utc};
use entity::attendance::AttendanceState;
use meetpoint::{
    model::{
        api::{PaginationDto, PaginationQuery, ResponseDto},
        attendance::{AttendanceStateDto, CreateAttendanceDto},
        category::SaveCategoryDto,
        event::{EventDto, SaveEventDto},
        rating::CreateRatingDto,
    },
    server::{
        controller::{
            attendance::create_attendance,
            category::create_category,
            event::{create_event, delete_event, get_events},
            rating::create_rating,
        },
        error::Error,
        model::auth::{AuthUser, RequireAdmin},
    },
};
use meetpoint_test_utils::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{auth_user, test_app_state};

fn admin_user(user: &entity::user::Model) -> AuthUser {
    AuthUser {
        id: user.id,
        email: user.email.clone(),
        roles: vec!["ADMIN".to_string()],
    }
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

/// Walks the happy path end to end.
///
/// An admin creates a category, an organizer publishes an event a week out,
/// an attendee registers for it, and once an event has passed the attendee
/// rates the organizer. A second rating for the same event is refused.
#[tokio::test]
async fn full_event_lifecycle() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db.clone());

    let admin = factory::create_admin(&setup.db, "admin@meetpoint.test").await?;
    let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
    let attendee = factory::create_user(&setup.db, "attendee@meetpoint.test").await?;

    // Admin sets up a category.
    let resp = create_category(
        State(state.clone()),
        RequireAdmin(admin_user(&admin)),
        Json(SaveCategoryDto {
            name: "Tech".to_string(),
            description: "Technology meetups".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: ResponseDto<meetpoint::model::category::CategoryDto> = body_json(resp).await;
    let category_id = category.data.unwrap().id;

    // Organizer publishes an event a week out.
    let resp = create_event(
        State(state.clone()),
        auth_user(&organizer),
        Json(SaveEventDto {
            category_id,
            title: "Rustacean Meetup".to_string(),
            description: "Monthly gathering for Rust developers".to_string(),
            location: "Managua".to_string(),
            date: Utc::now().naive_utc() + TimeDelta::days(7),
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let event: ResponseDto<EventDto> = body_json(resp).await;
    let event_id = event.data.unwrap().id;

    // Attendee registers.
    let resp = create_attendance(
        State(state.clone()),
        auth_user(&attendee),
        Json(CreateAttendanceDto {
            event_id,
            state: AttendanceStateDto::Confirmed,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Once an event has passed the attendee rates the organizer.
    let past_event = factory::create_event(
        &setup.db,
        category_id,
        organizer.id,
        Utc::now().naive_utc() - TimeDelta::days(1),
    )
    .await?;
    factory::create_attendance(
        &setup.db,
        attendee.id,
        past_event.id,
        AttendanceState::Confirmed,
    )
    .await?;

    let rating_dto = || CreateRatingDto {
        organizer_id: organizer.id,
        event_id: past_event.id,
        score: Decimal::new(45, 1),
    };

    let resp = create_rating(State(state.clone()), auth_user(&attendee), Json(rating_dto()))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let result = create_rating(State(state.clone()), auth_user(&attendee), Json(rating_dto())).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    // Both events show up in the listing.
    let resp = get_events(
        State(state),
        auth_user(&attendee),
        Query(PaginationQuery {
            page: None,
            search_term: None,
        }),
    )
    .await
    .unwrap()
    .into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let events: ResponseDto<PaginationDto<EventDto>> = body_json(resp).await;
    let events = events.data.unwrap();
    assert_eq!(events.total_items, 2);
    assert_eq!(events.current_page, 1);

    Ok(())
}

/// Expect Forbidden when someone other than the organizer deletes an event
#[tokio::test]
async fn delete_event_requires_organizer() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db.clone());

    let organizer = factory::create_user(&setup.db, "organizer@meetpoint.test").await?;
    let stranger = factory::create_user(&setup.db, "stranger@meetpoint.test").await?;
    let category = factory::create_category(&setup.db, "Tech").await?;
    let event = factory::create_event(
        &setup.db,
        category.id,
        organizer.id,
        Utc::now().naive_utc() + TimeDelta::days(7),
    )
    .await?;

    let result = delete_event(State(state), auth_user(&stranger), Path(event.id)).await;

    assert!(matches!(result, Err(Error::Forbidden(_))));

    Ok(())
}

/// Expect NotFound for an attendance against a missing event
#[tokio::test]
async fn attendance_missing_event() -> Result<(), TestError> {
    let setup = meetpoint_test_utils::test_setup_with_all_tables!()?;
    let state = test_app_state(setup.db.clone());

    let attendee = factory::create_user(&setup.db, "attendee@meetpoint.test").await?;

    let result = create_attendance(
        State(state),
        auth_user(&attendee),
        Json(CreateAttendanceDto {
            event_id: Uuid::new_v4(),
            state: AttendanceStateDto::Confirmed,
        }),
    )
    .await;

    assert!(matches!(result, Err(Error::NotFound(_))));

    Ok(())
}
