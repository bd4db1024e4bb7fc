//! GraphQL schema definition with queries, mutations, and subscriptions
//!
//! This is the single API surface for the navmap backend.

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{MergedObject, Schema};

use crate::db::Database;
use crate::services::{PasswordHasher, PubSub};

use super::mutations::{ContentMutations, MapMutations, TelemetryMutations, UserMutations};
use super::operations::{SchemaCheckError, check_schema};
use super::queries::{ContentQueries, MapQueries, TelemetryQueries, UserQueries};
use super::subscriptions::SubscriptionRoot;

/// The GraphQL schema type
pub type NavMapSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

#[derive(MergedObject, Default)]
#[graphql(name = "Query")]
pub struct QueryRoot(UserQueries, MapQueries, TelemetryQueries, ContentQueries);

#[derive(MergedObject, Default)]
#[graphql(name = "Mutation")]
pub struct MutationRoot(
    UserMutations,
    MapMutations,
    TelemetryMutations,
    ContentMutations,
);

/// Build the GraphQL schema with all resolvers
pub fn build_schema(
    db: Database,
    pubsub: Arc<PubSub>,
    password_hasher: PasswordHasher,
) -> NavMapSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .extension(Tracing)
    .data(db)
    .data(pubsub)
    .data(password_hasher)
    .finish()
}

/// Check that the built schema serves exactly the catalogued operations
pub fn verify_schema(schema: &NavMapSchema) -> Result<(), SchemaCheckError> {
    let mismatch = check_schema(&schema.sdl())?;
    if mismatch.is_empty() {
        Ok(())
    } else {
        Err(SchemaCheckError::Mismatch(mismatch))
    }
}
