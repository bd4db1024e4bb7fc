// Helpers shared across GraphQL query/mutation/type modules.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Result};

use crate::db::{Database, DbError, DbResult};
use crate::services::{PasswordHasher, PubSub};

impl ErrorExtensions for DbError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert a repository result into a resolver result, keeping the error code
pub(crate) trait DbResultExt<T> {
    fn into_gql(self) -> Result<T>;
}

impl<T> DbResultExt<T> for DbResult<T> {
    fn into_gql(self) -> Result<T> {
        self.map_err(|e| {
            if matches!(e, DbError::Database(_)) {
                tracing::error!(error = %e, "Database error");
            }
            e.extend()
        })
    }
}

/// Error for failures outside the store (e.g. password hashing)
pub(crate) fn internal_error(err: anyhow::Error) -> async_graphql::Error {
    tracing::error!(error = %err, "Internal error");
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", "INTERNAL_ERROR"))
}

/// Typed access to the shared services registered on the schema
pub(crate) trait ContextExt {
    fn db(&self) -> &Database;
    fn pubsub(&self) -> &Arc<PubSub>;
    fn password_hasher(&self) -> &PasswordHasher;
}

impl ContextExt for Context<'_> {
    fn db(&self) -> &Database {
        self.data_unchecked::<Database>()
    }

    fn pubsub(&self) -> &Arc<PubSub> {
        self.data_unchecked::<Arc<PubSub>>()
    }

    fn password_hasher(&self) -> &PasswordHasher {
        self.data_unchecked::<PasswordHasher>()
    }
}
