//! Backend test support utilities
//!
//! This crate provides utilities shared by the backend's unit and integration
//! tests: unified logging initialization, problem-details assertions, and
//! unique identifiers for test callers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
