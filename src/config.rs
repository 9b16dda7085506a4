//! Director end-to-end tests configuration
//!
//! Every value has a default so the tests run against a local Director
//! without any setup. Values are overridden with environment variables
//! prefixed with "DIRECTOR" (`DIRECTOR_GRAPHQL_API`, `DIRECTOR_TIMEOUT`, ...)
//! or from an optional yaml file.
//!
//! # Example configuration
//! ```yaml
//! ---
//! graphql_api: 'https://director.local/graphql'
//! timeout: 30
//! default_tenant: test-end-to-end
//! enum_fields:
//!   - type
//! fields:
//!   Application: 'id name webhooks { $Webhook }'
//!   Webhook: 'id type url'
//! ```

use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{ConfigError, Environment, File};

/// Endpoint used when `DIRECTOR_GRAPHQL_API` is not set
pub const DEFAULT_GRAPHQL_API: &str = "http://127.0.0.1:3000/graphql";
/// Tenant sent when a request does not carry one
pub const DEFAULT_TENANT: &str = "test-end-to-end";

/// A Configuration structure
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Director GraphQL endpoint
    #[serde(default = "default_graphql_api")]
    pub graphql_api: String,
    /// Overall request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Value of the `Tenant` header injected into requests without one
    #[serde(default = "default_tenant")]
    pub default_tenant: String,
    /// Module root the query examples are written under
    #[serde(default = "default_examples_root")]
    pub examples_root: PathBuf,
    /// Input keys whose string values are GraphQL enum values
    #[serde(default)]
    pub enum_fields: Vec<String>,
    /// Named field selections
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

impl Config {
    /// Returns a configuration object built only from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(env_source(None))
            .build()?
            .try_deserialize()
    }

    /// Returns a configuration object built from the given variables instead
    /// of the process environment. Keys are full variable names
    /// (`DIRECTOR_GRAPHQL_API`).
    pub fn from_env_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(env_source(Some(vars)))
            .build()?
            .try_deserialize()
    }

    /// Returns a configuration object from a yaml config file path with merged values from
    /// environment variables prefixed with "DIRECTOR".
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let path = Path::new(config_file);
        tracing::debug!("Reading configuration from {:?}", path);
        config::Config::builder()
            .add_source(File::from(path))
            .add_source(env_source(None))
            .build()?
            .try_deserialize()
    }

    /// Returns a configuration object from a string representing configuration file
    pub fn from_config_str(data: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(File::from_str(data, config::FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }

    /// Returns the request timeout
    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_api: default_graphql_api(),
            timeout: default_timeout(),
            default_tenant: default_tenant(),
            examples_root: default_examples_root(),
            enum_fields: Vec::new(),
            fields: HashMap::new(),
        }
    }
}

// DIRECTOR_GRAPHQL_API goes to graphql_api, empty values keep the defaults
fn env_source(vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix("DIRECTOR")
        .prefix_separator("_")
        .separator("__")
        .ignore_empty(true)
        .source(vars)
}

fn default_graphql_api() -> String {
    DEFAULT_GRAPHQL_API.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_tenant() -> String {
    DEFAULT_TENANT.to_string()
}

fn default_examples_root() -> PathBuf {
    match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from("."),
    }
}
