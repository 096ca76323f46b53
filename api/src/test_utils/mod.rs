//! Test utilities
//!
//! Fixtures and pre-seeded boards for unit testing the engine services.
//! The in-memory store adapter doubles as the mock; it is explicit enough
//! that no mocking framework is needed here.

pub mod fixtures;

pub use fixtures::*;
