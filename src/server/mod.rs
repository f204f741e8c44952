//! Server application core modules.
//!
//! Everything behind the HTTP surface lives here: configuration, routing,
//! authentication, repositories, and the services that enforce the business
//! rules around events, attendances, ratings, reports and memberships.

pub mod config;
pub mod constant;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
