//! Standard constant values shared across tests.
//!
//! These are placeholder values, not real credentials.

/// Plaintext password every fixture user is created with.
pub static TEST_PASSWORD: &str = "Sup3rS3cret!";

/// Signing secret for tokens issued during tests.
pub static TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Default location used for fixture users and events.
pub static TEST_LOCATION: &str = "Managua";
