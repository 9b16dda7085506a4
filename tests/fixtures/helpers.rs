// Test helper functions and custom assertions
//
// Provides utilities for creating a test context against a mock Director and
// mocking GraphQL responses

use director_e2e::{common, config::Config, context::TestContext};
use std::collections::HashMap;
use std::path::Path;

/// Creates a test context pointing at the mock server
///
/// # Arguments
/// * `server_url` - URL of the mock Director server
/// * `examples_root` - Module root examples are written under
pub fn create_test_context(server_url: &str, examples_root: &Path) -> TestContext {
    common::init_tracing();
    let config = Config::from_env_vars(HashMap::from([
        (
            "DIRECTOR_GRAPHQL_API".to_string(),
            format!("{}/graphql", server_url),
        ),
        ("DIRECTOR_TIMEOUT".to_string(), "5".to_string()),
        (
            "DIRECTOR_EXAMPLES_ROOT".to_string(),
            examples_root.to_string_lossy().to_string(),
        ),
    ]))
    .expect("Failed to build test config");
    TestContext::new(config).expect("Failed to build test context")
}

/// Helper to setup a mockito mock of the GraphQL endpoint
///
/// # Arguments
/// * `server` - Mockito server instance
/// * `tenant` - Expected value of the tenant header
/// * `response_body` - JSON response to return
pub async fn setup_graphql_mock(
    server: &mut mockito::Server,
    tenant: &str,
    response_body: serde_json::Value,
) -> mockito::Mock {
    server
        .mock("POST", "/graphql")
        .match_header("tenant", tenant)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response_body.to_string())
        .create_async()
        .await
}

/// Custom assertion for saved example content
///
/// # Panics
/// Panics with descriptive message if the file does not hold the expected query
pub fn assert_example(path: &Path, expected_query: &str) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Example {:?} can not be read: {}", path, e));
    assert_eq!(
        content,
        format!(
            "# Code generated by Director end-to-end tests, DO NOT EDIT.\n{}",
            expected_query
        ),
        "Example {:?} has unexpected content",
        path
    );
}
