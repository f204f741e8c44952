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
        category::{CategoryDto, SaveCategoryDto},
    },
    server::{
        error::Error,
        model::{
            app::AppState,
            auth::{AuthUser, RequireAdmin},
        },
        service::category::CategoryService,
    },
};

pub static CATEGORY_TAG: &str = "categories";

/// List event categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of categories", body = ResponseDto<PaginationDto<CategoryDto>>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_categories(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, Error> {
    let category_service = CategoryService::new(&state.db);

    let page = query.page();
    let (categories, total_items) = category_service
        .get_categories(page, state.config.page_size, query.search_term.as_deref())
        .await?;

    let items = categories.into_iter().map(CategoryDto::from).collect();
    let pagination = PaginationDto::new(page, state.config.page_size, total_items, items);

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Categories retrieved", pagination)),
    )
        .into_response())
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category retrieved", body = ResponseDto<CategoryDto>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 404, description = "Category not found", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let category_service = CategoryService::new(&state.db);

    let category = category_service.get_category(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Category retrieved",
            CategoryDto::from(category),
        )),
    )
        .into_response())
}

/// Create a category (admin only)
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = CATEGORY_TAG,
    request_body = SaveCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ResponseDto<CategoryDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 409, description = "Category name already exists", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(dto): Json<SaveCategoryDto>,
) -> Result<impl IntoResponse, Error> {
    let category_service = CategoryService::new(&state.db);

    dto.validate()?;

    let category = category_service.create(dto, &admin).await?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseDto::created(
            "Category created",
            CategoryDto::from(category),
        )),
    )
        .into_response())
}

/// Edit a category (admin only)
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = SaveCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ResponseDto<CategoryDto>),
        (status = 400, description = "Validation failed", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 404, description = "Category not found", body = ResponseDto<Object>),
        (status = 409, description = "Category name already exists", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<Uuid>,
    Json(dto): Json<SaveCategoryDto>,
) -> Result<impl IntoResponse, Error> {
    let category_service = CategoryService::new(&state.db);

    dto.validate()?;

    let category = category_service.update(id, dto, &admin).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok(
            "Category updated",
            CategoryDto::from(category),
        )),
    )
        .into_response())
}

/// Delete a category (admin only)
///
/// Refused while any event still references it.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = ResponseDto<Object>),
        (status = 401, description = "Authentication required", body = ResponseDto<Object>),
        (status = 403, description = "Admin role required", body = ResponseDto<Object>),
        (status = 404, description = "Category not found", body = ResponseDto<Object>),
        (status = 409, description = "Category has events associated with it", body = ResponseDto<Object>),
        (status = 500, description = "Internal server error", body = ResponseDto<Object>)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let category_service = CategoryService::new(&state.db);

    category_service.delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ResponseDto::ok("Category deleted", ())),
    )
        .into_response())
}
