pub mod prelude;

pub mod attendance;
pub mod category;
pub mod comment;
pub mod event;
pub mod membership;
pub mod rating;
pub mod report;
pub mod user;
pub mod user_role;
