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
