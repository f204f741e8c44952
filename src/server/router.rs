//! HTTP routing and OpenAPI documentation configuration.
//!
//! All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI.
///
/// Each endpoint is annotated with OpenAPI specifications via utoipa, which
/// are collected into a unified OpenAPI document served at
/// `/api/docs/openapi.json`. Interactive documentation is served at
/// `/api/docs`.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "MeetPoint", description = "MeetPoint API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Registration and login"),
        (name = controller::user::USER_TAG, description = "User administration"),
        (name = controller::category::CATEGORY_TAG, description = "Event categories"),
        (name = controller::event::EVENT_TAG, description = "Event management"),
        (name = controller::attendance::ATTENDANCE_TAG, description = "Event attendance"),
        (name = controller::comment::COMMENT_TAG, description = "Event comments and replies"),
        (name = controller::rating::RATING_TAG, description = "Organizer ratings"),
        (name = controller::report::REPORT_TAG, description = "Organizer reports"),
        (name = controller::membership::MEMBERSHIP_TAG, description = "Memberships"),
        (name = controller::dashboard::DASHBOARD_TAG, description = "Admin dashboard"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::user::get_users, controller::user::create_user))
        .routes(routes!(
            controller::user::get_user,
            controller::user::update_user,
            controller::user::delete_user
        ))
        .routes(routes!(controller::user::toggle_block))
        .routes(routes!(
            controller::category::get_categories,
            controller::category::create_category
        ))
        .routes(routes!(
            controller::category::get_category,
            controller::category::update_category,
            controller::category::delete_category
        ))
        .routes(routes!(
            controller::event::get_events,
            controller::event::create_event
        ))
        .routes(routes!(
            controller::event::get_event,
            controller::event::update_event,
            controller::event::delete_event
        ))
        .routes(routes!(
            controller::attendance::get_attendances,
            controller::attendance::create_attendance
        ))
        .routes(routes!(
            controller::attendance::get_attendance,
            controller::attendance::update_attendance,
            controller::attendance::delete_attendance
        ))
        .routes(routes!(
            controller::comment::get_comments,
            controller::comment::create_comment
        ))
        .routes(routes!(
            controller::comment::get_comment,
            controller::comment::update_comment,
            controller::comment::delete_comment
        ))
        .routes(routes!(
            controller::rating::get_ratings,
            controller::rating::create_rating
        ))
        .routes(routes!(
            controller::rating::get_rating,
            controller::rating::update_rating,
            controller::rating::delete_rating
        ))
        .routes(routes!(
            controller::report::get_reports,
            controller::report::create_report
        ))
        .routes(routes!(
            controller::report::get_report,
            controller::report::update_report,
            controller::report::delete_report
        ))
        .routes(routes!(controller::membership::create_membership))
        .routes(routes!(controller::membership::get_my_membership))
        .routes(routes!(controller::dashboard::get_dashboard))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
