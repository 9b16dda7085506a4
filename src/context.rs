//! Test context
//!
//! Dependencies of the end-to-end tests. Build one per test run and pass it
//! to the tests by reference:
//!
//! ```no_run
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use director_e2e::{context::TestContext, types::Request};
//!
//! let tc = TestContext::from_env()?;
//! let mut req = Request::new("query { result: applications { data { id } } }");
//! let mut apps = serde_json::Value::Null;
//! tc.run_query(&mut req, &mut apps).await?;
//! # Ok(())
//! # }
//! ```
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::client::GraphQLClient;
use crate::config::Config;
use crate::examples::ExampleWriter;
use crate::fields::FieldsProvider;
use crate::graphqlizer::Graphqlizer;
use crate::types::{GenericGqlResponse, QueryError, Request};

#[derive(Clone, Debug)]
pub struct TestContext {
    pub graphqlizer: Graphqlizer,
    pub fields_provider: FieldsProvider,
    pub client: GraphQLClient,
    pub config: Config,
    examples: ExampleWriter,
}

impl TestContext {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = GraphQLClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Context configured from `DIRECTOR_*` environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(Config::from_env()?)
    }

    pub fn with_client(config: Config, client: GraphQLClient) -> Self {
        Self {
            graphqlizer: Graphqlizer::new(config.enum_fields.iter().cloned()),
            fields_provider: FieldsProvider::new(config.fields.clone()),
            examples: ExampleWriter::from_config(&config),
            client,
            config,
        }
    }

    /// Execute the request and store its `result` alias in `target`.
    ///
    /// Requests without a `Tenant` header get the configured default tenant.
    /// `target` is left untouched on error.
    pub async fn run_query<T: DeserializeOwned>(
        &self,
        req: &mut Request,
        target: &mut T,
    ) -> Result<(), QueryError> {
        *target = self.query(req).await?;
        Ok(())
    }

    /// Same as [`TestContext::run_query`], returning the `result` alias
    pub async fn query<T: DeserializeOwned>(&self, req: &mut Request) -> Result<T, QueryError> {
        if req.ensure_tenant(&self.config.default_tenant)? {
            tracing::trace!("Using default tenant {}", self.config.default_tenant);
        }
        let rsp: GenericGqlResponse<T> = self.client.run(req).await?;
        Ok(rsp.into_result())
    }

    pub fn examples(&self) -> &ExampleWriter {
        &self.examples
    }

    /// Save the query as documentation example.
    ///
    /// # Panics
    /// Panics, failing the calling test, when the example can not be written.
    pub fn save_example(&self, query: &str, example_name: &str) -> PathBuf {
        match self.examples.save(query, example_name) {
            Ok(path) => path,
            Err(e) => panic!("Saving example {:?} failed: {:?}", example_name, e),
        }
    }
}
