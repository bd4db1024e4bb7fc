//! Per-user navigation history

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{datetime_to_str, decode_err, new_id, str_to_datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationHistoryRecord {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub details: Option<String>,
}

impl sqlx::FromRow<'_, SqliteRow> for NavigationHistoryRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let timestamp: String = row.try_get("timestamp")?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            timestamp: str_to_datetime(&timestamp).map_err(decode_err)?,
            action: row.try_get("action")?,
            details: row.try_get("details")?,
        })
    }
}

impl DatabaseEntity for NavigationHistoryRecord {
    const TABLE_NAME: &'static str = "navigation_history";
    const ENTITY_NAME: &'static str = "NavigationHistory";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("user_id").references("users"),
        ColumnDef::text("timestamp"),
        ColumnDef::text("action"),
        ColumnDef::text("details").nullable(),
    ];
}

pub type NavigationHistoryRepository = Repository<NavigationHistoryRecord>;

impl Repository<NavigationHistoryRecord> {
    pub async fn create(
        &self,
        user_id: String,
        action: String,
        details: Option<String>,
    ) -> DbResult<NavigationHistoryRecord> {
        let values = Changes::new()
            .set("user_id", user_id)
            .set("timestamp", datetime_to_str(Utc::now()))
            .set("action", action)
            .set("details", details);
        self.insert(&new_id(), values).await
    }
}
