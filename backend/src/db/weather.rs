//! Weather samples attached to a map

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{datetime_to_str, decode_err, new_id, str_to_datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDataRecord {
    pub id: String,
    pub temperature: f64,
    pub conditions: String,
    pub timestamp: DateTime<Utc>,
    pub map_id: String,
}

impl sqlx::FromRow<'_, SqliteRow> for WeatherDataRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let timestamp: String = row.try_get("timestamp")?;

        Ok(Self {
            id: row.try_get("id")?,
            temperature: row.try_get("temperature")?,
            conditions: row.try_get("conditions")?,
            timestamp: str_to_datetime(&timestamp).map_err(decode_err)?,
            map_id: row.try_get("map_id")?,
        })
    }
}

impl DatabaseEntity for WeatherDataRecord {
    const TABLE_NAME: &'static str = "weather_data";
    const ENTITY_NAME: &'static str = "WeatherData";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::real("temperature"),
        ColumnDef::text("conditions"),
        ColumnDef::text("timestamp"),
        ColumnDef::text("map_id").references("maps"),
    ];
}

pub type WeatherDataRepository = Repository<WeatherDataRecord>;

impl Repository<WeatherDataRecord> {
    /// Record an observation taken now
    pub async fn create(
        &self,
        temperature: f64,
        conditions: String,
        map_id: String,
    ) -> DbResult<WeatherDataRecord> {
        let values = Changes::new()
            .set("temperature", temperature)
            .set("conditions", conditions)
            .set("timestamp", datetime_to_str(Utc::now()))
            .set("map_id", map_id);
        self.insert(&new_id(), values).await
    }

    /// Replace the observation values; both are always supplied
    pub async fn update(
        &self,
        id: &str,
        temperature: f64,
        conditions: String,
    ) -> DbResult<WeatherDataRecord> {
        let changes = Changes::new()
            .set("temperature", temperature)
            .set("conditions", conditions);
        self.update_columns(id, changes).await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::DbError;
    use crate::db::test_support::{seed_map, seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_and_update() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;

        let sample = db
            .weather()
            .create(18.5, "overcast".into(), map.id.clone())
            .await
            .unwrap();
        let updated = db
            .weather()
            .update(&sample.id, 21.0, "sunny".into())
            .await
            .unwrap();

        assert_eq!(updated.temperature, 21.0);
        assert_eq!(updated.conditions, "sunny");
        assert_eq!(updated.timestamp, sample.timestamp);
        assert_eq!(updated.map_id, map.id);
    }

    #[tokio::test]
    async fn test_unknown_map_is_rejected() {
        let db = test_db().await;
        let err = db
            .weather()
            .create(3.0, "snow".into(), "no-such-map".into())
            .await
            .unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));
    }

    #[tokio::test]
    async fn test_list_all_returns_samples() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;

        let morning = db
            .weather()
            .create(-2.5, "frost".into(), map.id.clone())
            .await
            .unwrap();
        let noon = db
            .weather()
            .create(6.0, "clear".into(), map.id.clone())
            .await
            .unwrap();

        let all = db.weather().list_all().await.unwrap();
        assert_eq!(all, vec![morning, noon]);
        assert_eq!(all[0].temperature, -2.5);
    }
}
