//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! The same mocks back the router tests in `integration_tests`, since the
//! application state holds its ports as trait objects.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
