//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Observable value tests
//! - Group filtering and selection tests
//! - Eager selection tests
//! - Beatmap set sorting and first-pick tests
//! - Filter criteria and query parser tests
