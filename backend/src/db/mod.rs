//! Database connection and repositories
//!
//! One repository per entity, all sharing a single SQLite pool.

pub mod comments;
pub mod entity;
pub mod error;
pub mod events;
pub mod favorites;
pub mod map_styles;
pub mod maps;
pub mod media;
pub mod navigation_history;
pub mod places;
pub mod routes;
pub mod schema_sync;
pub mod sqlite_helpers;
pub mod subscriptions;
pub mod target;
pub mod traffic;
pub mod users;
pub mod weather;

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info, warn};

pub use comments::{CommentRecord, CommentRepository, CreateComment, UpdateComment};
pub use entity::{DatabaseEntity, Repository};
pub use error::{DbError, DbResult};
pub use events::{CreateEvent, EventRecord, EventRepository, UpdateEvent};
pub use favorites::{FavoriteRecord, FavoriteRepository};
pub use map_styles::{CreateMapStyle, MapStyleRecord, MapStyleRepository};
pub use maps::{CreateMap, MapRecord, MapRepository, MapWithOwner, UpdateMap};
pub use media::{MediaRecord, MediaRepository};
pub use navigation_history::{NavigationHistoryRecord, NavigationHistoryRepository};
pub use places::{CreatePlace, PlaceRecord, PlaceRepository, UpdatePlace};
pub use routes::{CreateRoute, RouteRecord, RouteRepository, UpdateRoute};
pub use schema_sync::SchemaSyncResult;
pub use subscriptions::{PlanSubscriptionRecord, PlanSubscriptionRepository};
pub use target::TargetRef;
pub use traffic::{TrafficDataRecord, TrafficDataRepository};
pub use users::{CreateUser, DEFAULT_ROLE, UpdateUser, UserRecord, UserRepository};
pub use weather::{WeatherDataRecord, WeatherDataRepository};

/// Whether a connection URL points at an in-memory database
fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Database wrapper providing connection pool access
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database wrapper from an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (and create if needed) the database at `url`.
    ///
    /// Foreign keys are enforced on every connection. An in-memory database
    /// lives only as long as its connection, so the pool is pinned to one
    /// connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database URL '{}'", url))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if is_memory_url(url) {
            debug!("Using in-memory database with a single pinned connection");
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create database directory {}", parent.display())
                    })?;
                }
            }
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to open SQLite database")?;

        info!(url = %url, "Connected to database");
        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create missing tables and columns for every entity
    pub async fn sync_schema(&self) -> SchemaSyncResult {
        let result = schema_sync::sync_all_entity_schemas(&self.pool).await;
        for error in &result.errors {
            warn!(error = %error, "Schema sync error");
        }
        info!(
            tables_created = result.tables_created.len(),
            columns_added = result.columns_added.len(),
            "Schema sync complete"
        );
        result
    }

    /// Round-trip a trivial query, used by the readiness probe
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    pub fn maps(&self) -> MapRepository {
        MapRepository::new(self.pool.clone())
    }

    pub fn places(&self) -> PlaceRepository {
        PlaceRepository::new(self.pool.clone())
    }

    pub fn routes(&self) -> RouteRepository {
        RouteRepository::new(self.pool.clone())
    }

    pub fn favorites(&self) -> FavoriteRepository {
        FavoriteRepository::new(self.pool.clone())
    }

    /// Billing plan subscriptions
    pub fn plan_subscriptions(&self) -> PlanSubscriptionRepository {
        PlanSubscriptionRepository::new(self.pool.clone())
    }

    pub fn traffic(&self) -> TrafficDataRepository {
        TrafficDataRepository::new(self.pool.clone())
    }

    pub fn weather(&self) -> WeatherDataRepository {
        WeatherDataRepository::new(self.pool.clone())
    }

    pub fn comments(&self) -> CommentRepository {
        CommentRepository::new(self.pool.clone())
    }

    pub fn media(&self) -> MediaRepository {
        MediaRepository::new(self.pool.clone())
    }

    pub fn navigation_history(&self) -> NavigationHistoryRepository {
        NavigationHistoryRepository::new(self.pool.clone())
    }

    pub fn map_styles(&self) -> MapStyleRepository {
        MapStyleRepository::new(self.pool.clone())
    }

    pub fn events(&self) -> EventRepository {
        EventRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Fresh in-memory database with every table created
    pub async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory database");
        let result = db.sync_schema().await;
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        db
    }

    pub async fn seed_user(db: &Database, email: &str) -> UserRecord {
        db.users()
            .create(CreateUser {
                name: "Test User".to_string(),
                email: email.to_string(),
                password_hash: "not-a-real-hash".to_string(),
                role: DEFAULT_ROLE.to_string(),
            })
            .await
            .expect("seed user")
    }

    pub async fn seed_map(db: &Database, owner_id: &str) -> MapRecord {
        db.maps()
            .create(CreateMap {
                name: "Test Map".to_string(),
                map_type: "road".to_string(),
                owner_id: owner_id.to_string(),
            })
            .await
            .expect("seed map")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_urls() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file:navmap?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite:./data/navmap.db"));
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = test_support::test_db().await;
        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
        db.ping().await.unwrap();
    }
}
