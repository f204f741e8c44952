//! Role names and other values shared across services and controllers.

pub static ROLE_ADMIN: &str = "ADMIN";
pub static ROLE_ORGANIZER: &str = "ORGANIZER";
pub static ROLE_USER: &str = "USER";

pub static KNOWN_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_ORGANIZER, ROLE_USER];

/// Access token lifetime in seconds.
pub static TOKEN_LIFETIME_SECS: i64 = 3600;

/// How many rows the dashboard's upcoming-events slice returns.
pub static DASHBOARD_EVENT_COUNT: u64 = 5;
