//! Test fixture modules for seeding the in-memory database.
//!
//! `factory` provides insert helpers that write a row with standard test
//! values and hand back the persisted model, so tests only spell out the
//! fields they actually care about.

pub mod factory;
