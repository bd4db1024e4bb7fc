//! Automatic schema synchronization from entity definitions
//!
//! - Creates missing tables automatically
//! - Adds missing columns automatically
//! - Does NOT handle column renames or type changes (requires DB wipe)

use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::entity::{ColumnDef, DatabaseEntity};
use super::{
    CommentRecord, EventRecord, FavoriteRecord, MapRecord, MapStyleRecord, MediaRecord,
    NavigationHistoryRecord, PlaceRecord, PlanSubscriptionRecord, RouteRecord, TrafficDataRecord,
    UserRecord, WeatherDataRecord,
};

/// Result of a schema sync operation
#[derive(Debug, Default)]
pub struct SchemaSyncResult {
    pub tables_created: Vec<String>,
    pub columns_added: Vec<(String, String)>, // (table, column)
    pub errors: Vec<String>,
}

impl SchemaSyncResult {
    fn merge(&mut self, other: SchemaSyncResult) {
        self.tables_created.extend(other.tables_created);
        self.columns_added.extend(other.columns_added);
        self.errors.extend(other.errors);
    }
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table_name: &str) -> Result<bool, sqlx::Error> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = ?")
            .bind(table_name)
            .fetch_optional(pool)
            .await?;

    Ok(result.is_some())
}

/// Get existing columns for a table
async fn get_table_columns(
    pool: &SqlitePool,
    table_name: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(i32, String, String, i32, Option<String>, i32)> =
        sqlx::query_as(&format!("PRAGMA table_info({})", table_name))
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(_, name, _, _, _, _)| name).collect())
}

/// Sync a single entity's table to the database
pub async fn sync_entity<E: DatabaseEntity>(
    pool: &SqlitePool,
) -> Result<SchemaSyncResult, sqlx::Error> {
    let mut result = SchemaSyncResult::default();
    let table_name = E::TABLE_NAME;

    if !table_exists(pool, table_name).await? {
        let create_sql = E::create_table_sql();
        debug!(table = table_name, sql = %create_sql, "Creating table");

        match sqlx::query(&create_sql).execute(pool).await {
            Ok(_) => {
                info!(table = table_name, "Created table");
                result.tables_created.push(table_name.to_string());
            }
            Err(e) => {
                let msg = format!("Failed to create table {}: {}", table_name, e);
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
        return Ok(result);
    }

    let existing_columns = get_table_columns(pool, table_name).await?;
    for col_def in E::COLUMNS {
        if existing_columns.iter().any(|c| c == col_def.name) {
            continue;
        }

        let alter_sql = generate_add_column_sql(table_name, col_def);
        debug!(table = table_name, sql = %alter_sql, "Adding column");

        match sqlx::query(&alter_sql).execute(pool).await {
            Ok(_) => {
                info!(table = table_name, column = col_def.name, "Added column");
                result
                    .columns_added
                    .push((table_name.to_string(), col_def.name.to_string()));
            }
            Err(e) => {
                let msg = format!(
                    "Failed to add column {}.{}: {}",
                    table_name, col_def.name, e
                );
                warn!("{}", msg);
                result.errors.push(msg);
            }
        }
    }

    Ok(result)
}

/// Generate ALTER TABLE ADD COLUMN SQL
fn generate_add_column_sql(table_name: &str, col: &ColumnDef) -> String {
    let mut sql = format!(
        "ALTER TABLE {} ADD COLUMN {} {}",
        table_name, col.name, col.sql_type
    );

    // SQLite cannot add PRIMARY KEY or UNIQUE columns, and a NOT NULL column
    // needs a default.
    if let Some(default) = col.default {
        if !col.nullable {
            sql.push_str(" NOT NULL");
        }
        sql.push_str(&format!(" DEFAULT {}", default));
    } else if !col.nullable {
        let default_val = match col.sql_type {
            "INTEGER" => "0",
            "REAL" => "0.0",
            _ => "''",
        };
        sql.push_str(&format!(" NOT NULL DEFAULT {}", default_val));
    }

    sql
}

/// Sync all entity tables to the database.
///
/// Parents are synced before the tables that reference them.
pub async fn sync_all_entity_schemas(pool: &SqlitePool) -> SchemaSyncResult {
    let mut total_result = SchemaSyncResult::default();

    macro_rules! sync_one {
        ($entity:ty) => {
            match sync_entity::<$entity>(pool).await {
                Ok(result) => total_result.merge(result),
                Err(e) => {
                    total_result.errors.push(format!(
                        "Error syncing {}: {}",
                        stringify!($entity),
                        e
                    ));
                }
            }
        };
    }

    sync_one!(UserRecord);
    sync_one!(MapRecord);

    // Map contents
    sync_one!(PlaceRecord);
    sync_one!(RouteRecord);
    sync_one!(TrafficDataRecord);
    sync_one!(WeatherDataRecord);
    sync_one!(EventRecord);
    sync_one!(MediaRecord);

    // User-owned
    sync_one!(PlanSubscriptionRecord);
    sync_one!(FavoriteRecord);
    sync_one!(CommentRecord);
    sync_one!(NavigationHistoryRecord);
    sync_one!(MapStyleRecord);

    total_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_sync_creates_every_table_once() {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();

        let first = sync_all_entity_schemas(db.pool()).await;
        assert!(first.errors.is_empty(), "{:?}", first.errors);
        assert_eq!(first.tables_created.len(), 13);
        assert_eq!(first.tables_created[0], "users");

        let second = sync_all_entity_schemas(db.pool()).await;
        assert!(second.tables_created.is_empty());
        assert!(second.columns_added.is_empty());
    }

    #[tokio::test]
    async fn test_sync_adds_missing_column() {
        let db = Database::connect("sqlite::memory:", 1).await.unwrap();
        sqlx::query("CREATE TABLE users (id TEXT PRIMARY KEY, name TEXT NOT NULL, email TEXT NOT NULL, password_hash TEXT NOT NULL)")
            .execute(db.pool())
            .await
            .unwrap();

        let result = sync_entity::<UserRecord>(db.pool()).await.unwrap();
        assert_eq!(
            result.columns_added,
            vec![("users".to_string(), "role".to_string())]
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_add_column_sql() {
        assert_eq!(
            generate_add_column_sql("routes", &ColumnDef::real("distance")),
            "ALTER TABLE routes ADD COLUMN distance REAL NOT NULL DEFAULT 0.0"
        );
        assert_eq!(
            generate_add_column_sql("events", &ColumnDef::text("description").nullable()),
            "ALTER TABLE events ADD COLUMN description TEXT"
        );
        assert_eq!(
            generate_add_column_sql("users", &ColumnDef::text("role").default("'user'")),
            "ALTER TABLE users ADD COLUMN role TEXT NOT NULL DEFAULT 'user'"
        );
    }
}
