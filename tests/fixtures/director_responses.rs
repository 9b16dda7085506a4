// Mock Director response data for testing
//
// Provides GraphQL response bodies as returned by Director, payload aliased as `result`

use serde_json::json;

/// Single application with a webhook
pub fn application_response(id: &str, name: &str) -> serde_json::Value {
    json!({
        "data": {
            "result": {
                "id": id,
                "name": name,
                "webhooks": [
                    {"id": "2b6b1b1e-8d2c-4e0f-9a44-6c0a3fcb1e11", "type": "CONFIGURATION_CHANGED", "url": "https://foo.bar"}
                ]
            }
        }
    })
}

/// Page of application ids
pub fn applications_page_response(ids: &[&str]) -> serde_json::Value {
    json!({
        "data": {
            "result": {
                "data": ids.iter().map(|id| json!({"id": id})).collect::<Vec<_>>(),
                "totalCount": ids.len()
            }
        }
    })
}

/// Error returned for objects of another tenant
pub fn not_found_response() -> serde_json::Value {
    json!({
        "data": {"result": null},
        "errors": [
            {"message": "Object was not found", "path": ["result"]}
        ]
    })
}
