//! Director GraphQL client
//!
//! Builds the HTTP client used against test environments and executes
//! GraphQL requests over it.
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::ClientBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;
use crate::types::{QueryError, Request};

/// HTTP client for ephemeral test environments.
///
/// Certificate verification is disabled since test clusters run with
/// self-signed certificates. Never use it against production.
pub fn new_authorized_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .danger_accept_invalid_certs(true)
        .timeout(timeout)
        .build()
}

/// Minimal GraphQL client bound to a single endpoint
#[derive(Clone, Debug)]
pub struct GraphQLClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GraphQLClient {
    pub fn new(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Client for the configured Director endpoint. No connection is made.
    pub fn from_config(config: &Config) -> Result<Self, QueryError> {
        let http = new_authorized_http_client(config.get_timeout())?;
        Ok(Self::new(config.graphql_api.clone(), http))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Execute the request and decode the `data` member of the response.
    pub async fn run<T: DeserializeOwned>(&self, req: &Request) -> Result<T, QueryError> {
        let body = json!({
            "query": req.query(),
            "variables": req.vars(),
        });
        tracing::debug!("Sending GraphQL request to {}", self.endpoint);
        tracing::trace!("Request body: {}", body);

        let rsp = self
            .http
            .post(&self.endpoint)
            .headers(req.headers().clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&body)
            .send()
            .await?;

        let status = rsp.status();
        let text = rsp.text().await?;
        tracing::trace!("Status: {}, body: {}", status, text);

        if !status.is_success() {
            return Err(QueryError::Status { status, body: text });
        }

        // errors are checked before the data is typed, partial data may not fit T
        let gql: graphql_client::Response<Value> = serde_json::from_str(&text)?;
        if let Some(errors) = gql.errors {
            if !errors.is_empty() {
                return Err(QueryError::GraphQL(
                    errors.into_iter().map(|e| e.message).collect(),
                ));
            }
        }
        match gql.data {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => Err(QueryError::MissingData),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::*;
    use mockito::Matcher;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::time::Duration;

    macro_rules! aw {
        ($e:expr) => {
            tokio_test::block_on($e)
        };
    }

    fn test_client(url: &str) -> client::GraphQLClient {
        let http = client::new_authorized_http_client(Duration::from_secs(1)).unwrap();
        client::GraphQLClient::new(format!("{}/graphql", url), http)
    }

    #[test]
    fn test_client_from_default_config() {
        let config = config::Config::from_env_vars(HashMap::new()).unwrap();
        let client = client::GraphQLClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:3000/graphql");
    }

    #[test]
    fn test_client_from_env_endpoint() {
        let config = config::Config::from_env_vars(HashMap::from([(
            "DIRECTOR_GRAPHQL_API".to_string(),
            "https://example.test/graphql".to_string(),
        )]))
        .unwrap();
        let client = client::GraphQLClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/graphql");
    }

    #[test]
    fn test_run() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/graphql")
            .expect(1)
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "query": "query ($id: ID!) { result: application(id: $id) { id } }",
                "variables": {"id": "app-1"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"result": {"id": "app-1"}}}"#)
            .create();

        let client = test_client(&server.url());
        let req = types::Request::new("query ($id: ID!) { result: application(id: $id) { id } }")
            .var("id", "app-1");
        let data: Value = aw!(client.run(&req)).unwrap();
        assert_eq!(data, json!({"result": {"id": "app-1"}}));
        mock.assert();
    }

    #[test]
    fn test_run_graphql_errors() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": null, "errors": [{"message": "Object was not found"}]}"#)
            .create();

        let client = test_client(&server.url());
        let res: Result<Value, _> = aw!(client.run(&types::Request::new("{}")));
        match res {
            Err(types::QueryError::GraphQL(messages)) => {
                assert_eq!(messages, vec!["Object was not found".to_string()])
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_run_non_success_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(502)
            .with_body("bad gateway")
            .create();

        let client = test_client(&server.url());
        let res: Result<Value, _> = aw!(client.run(&types::Request::new("{}")));
        match res {
            Err(types::QueryError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_run_malformed_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body("<html></html>")
            .create();

        let client = test_client(&server.url());
        let res: Result<Value, _> = aw!(client.run(&types::Request::new("{}")));
        assert!(matches!(res, Err(types::QueryError::Decode(_))));
    }

    #[test]
    fn test_run_missing_data() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_body(r#"{"data": null}"#)
            .create();

        let client = test_client(&server.url());
        let res: Result<Value, _> = aw!(client.run(&types::Request::new("{}")));
        assert!(matches!(res, Err(types::QueryError::MissingData)));
    }

    #[test]
    fn test_run_connection_refused() {
        // port 9 (discard) is not listening on test hosts
        let client = test_client("http://127.0.0.1:9");
        let res: Result<Value, _> = aw!(client.run(&types::Request::new("{}")));
        assert!(matches!(res, Err(types::QueryError::Transport(_))));
    }
}
