//! Traffic samples attached to a map

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{datetime_to_str, decode_err, new_id, str_to_datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct TrafficDataRecord {
    pub id: String,
    pub traffic_level: String,
    pub timestamp: DateTime<Utc>,
    pub map_id: String,
}

impl sqlx::FromRow<'_, SqliteRow> for TrafficDataRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let timestamp: String = row.try_get("timestamp")?;

        Ok(Self {
            id: row.try_get("id")?,
            traffic_level: row.try_get("traffic_level")?,
            timestamp: str_to_datetime(&timestamp).map_err(decode_err)?,
            map_id: row.try_get("map_id")?,
        })
    }
}

impl DatabaseEntity for TrafficDataRecord {
    const TABLE_NAME: &'static str = "traffic_data";
    const ENTITY_NAME: &'static str = "TrafficData";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("traffic_level"),
        ColumnDef::text("timestamp"),
        ColumnDef::text("map_id").references("maps"),
    ];
}

pub type TrafficDataRepository = Repository<TrafficDataRecord>;

impl Repository<TrafficDataRecord> {
    /// Record a sample taken now
    pub async fn create(&self, traffic_level: String, map_id: String) -> DbResult<TrafficDataRecord> {
        let values = Changes::new()
            .set("traffic_level", traffic_level)
            .set("timestamp", datetime_to_str(Utc::now()))
            .set("map_id", map_id);
        self.insert(&new_id(), values).await
    }

    pub async fn update(&self, id: &str, traffic_level: String) -> DbResult<TrafficDataRecord> {
        self.update_columns(id, Changes::new().set("traffic_level", traffic_level))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::db::test_support::{seed_map, seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_stamps_now() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;

        let before = Utc::now();
        let sample = db
            .traffic()
            .create("high".into(), map.id.clone())
            .await
            .unwrap();

        assert_eq!(sample.traffic_level, "high");
        assert_eq!(sample.map_id, map.id);
        assert!(sample.timestamp >= before);
        assert!(sample.timestamp <= Utc::now());
    }

    #[tokio::test]
    async fn test_update_missing_sample() {
        let db = test_db().await;
        let err = db.traffic().update("missing", "low".into()).await.unwrap_err();
        assert_matches!(err, DbError::NotFound { entity: "TrafficData", .. });
    }

    #[tokio::test]
    async fn test_list_all_returns_samples() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;

        let jam = db.traffic().create("jammed".into(), map.id.clone()).await.unwrap();
        let clear = db.traffic().create("free".into(), map.id.clone()).await.unwrap();

        assert_eq!(db.traffic().list_all().await.unwrap(), vec![jam, clear]);
        assert_eq!(db.traffic().list_by("map_id", &map.id).await.unwrap().len(), 2);
    }
}
