pub use super::attendance::Entity as Attendance;
pub use super::category::Entity as Category;
pub use super::comment::Entity as Comment;
pub use super::event::Entity as Event;
pub use super::membership::Entity as Membership;
pub use super::rating::Entity as Rating;
pub use super::report::Entity as Report;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
