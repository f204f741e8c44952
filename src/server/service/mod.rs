//! Service layer for business logic and orchestration.
//!
//! Services validate cross-entity rules before every write and coordinate the
//! transactional cascade deletes for users and events. Repositories do the
//! raw persistence; nothing here talks SQL directly.

pub mod attendance;
pub mod auth;
pub mod category;
pub mod comment;
pub mod dashboard;
pub mod event;
pub mod membership;
pub mod rating;
pub mod report;
pub mod user;
