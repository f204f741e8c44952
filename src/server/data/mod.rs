//! Persistence gateway.
//!
//! One repository per entity. Repositories are generic over
//! [`sea_orm::ConnectionTrait`] so the same code runs against the pooled
//! connection or an open transaction during the cascade deletes.

pub mod attendance;
pub mod category;
pub mod comment;
pub mod event;
pub mod membership;
pub mod rating;
pub mod report;
pub mod user;
