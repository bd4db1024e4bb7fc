//! GraphQL API with subscriptions for real-time updates
//!
//! This module provides a GraphQL API using async-graphql with support for
//! queries, mutations, and subscriptions over WebSocket.
//!
//! Queries and mutations are split into domain modules (`queries/`,
//! `mutations/`), each a `#[derive(Default)]` struct with an `#[Object]` impl,
//! merged into the `Query`/`Mutation` roots in `schema.rs`.

pub mod helpers;
pub mod mutations;
pub mod operations;
pub mod queries;
pub mod scalars;
mod schema;
mod subscriptions;
pub mod types;

pub use operations::{Operation, OperationKind, SchemaCheckError, SchemaMismatch};
pub use schema::{MutationRoot, NavMapSchema, QueryRoot, build_schema, verify_schema};
pub use subscriptions::SubscriptionRoot;
