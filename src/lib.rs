//! Director end-to-end test support
//!
//! Client, query runner and example writer used by the end-to-end tests of
//! the Director GraphQL API. Queries under test alias their payload as
//! `result` and are executed for the tenant in the `Tenant` header.
pub mod client;
pub mod common;
pub mod config;
pub mod context;
pub mod examples;
pub mod fields;
pub mod graphqlizer;
pub mod types;
