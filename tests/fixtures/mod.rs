// Shared test fixtures and utilities for integration tests
//
// This module provides:
// - Director GraphQL mock response data (director_responses.rs)
// - Test helper functions and custom assertions (helpers.rs)

pub mod director_responses;
pub mod helpers;
