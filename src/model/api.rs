use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Envelope wrapped around every API response body.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ResponseDto<T> {
    /// HTTP status code mirrored into the body
    pub status_code: u16,
    /// Whether the request succeeded
    pub status: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Payload, absent on errors
    pub data: Option<T>,
}

impl<T> ResponseDto<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 200,
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 201,
            status: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ResponseDto<()> {
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            status: false,
            message: message.into(),
            data: None,
        }
    }
}

/// One page of a list endpoint.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto<T> {
    pub current_page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub items: Vec<T>,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl<T> PaginationDto<T> {
    pub fn new(current_page: u64, page_size: u64, total_items: u64, items: Vec<T>) -> Self {
        let total_pages = total_items.div_ceil(page_size.max(1));

        Self {
            current_page,
            page_size,
            total_items,
            total_pages,
            items,
            has_previous_page: current_page > 1,
            has_next_page: current_page < total_pages,
        }
    }
}

/// Query parameters accepted by every list endpoint.
#[derive(Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Substring filter applied to the entity's searchable fields
    pub search_term: Option<String>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}
