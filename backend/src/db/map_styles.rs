//! User-defined map styles

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{
    bool_to_int, datetime_to_str, decode_err, int_to_bool, json_to_str, new_id, str_to_datetime,
    str_to_json,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MapStyleRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub style: JsonValue,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, SqliteRow> for MapStyleRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let style: String = row.try_get("style")?;
        let is_default: i32 = row.try_get("is_default")?;
        let created: String = row.try_get("created_at")?;
        let updated: String = row.try_get("updated_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            style: str_to_json(&style).map_err(decode_err)?,
            is_default: int_to_bool(is_default),
            created_at: str_to_datetime(&created).map_err(decode_err)?,
            updated_at: str_to_datetime(&updated).map_err(decode_err)?,
        })
    }
}

impl DatabaseEntity for MapStyleRecord {
    const TABLE_NAME: &'static str = "map_styles";
    const ENTITY_NAME: &'static str = "MapStyle";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("user_id").references("users"),
        ColumnDef::text("name"),
        ColumnDef::text("style"),
        ColumnDef::integer("is_default").default("0"),
        ColumnDef::text("created_at"),
        ColumnDef::text("updated_at"),
    ];
}

#[derive(Debug, Clone)]
pub struct CreateMapStyle {
    pub user_id: String,
    pub name: String,
    pub style: JsonValue,
    pub is_default: bool,
}

pub type MapStyleRepository = Repository<MapStyleRecord>;

impl Repository<MapStyleRecord> {
    pub async fn create(&self, input: CreateMapStyle) -> DbResult<MapStyleRecord> {
        let now = datetime_to_str(Utc::now());
        let values = Changes::new()
            .set("user_id", input.user_id)
            .set("name", input.name)
            .set("style", json_to_str(&input.style))
            .set("is_default", bool_to_int(input.is_default))
            .set("created_at", now.clone())
            .set("updated_at", now);
        self.insert(&new_id(), values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_user, test_db};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_style_payload_roundtrip() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let style = json!({
            "theme": "dark",
            "layers": [{"id": "roads", "color": "#ffcc00", "width": 2.5}],
            "labels": null
        });

        let created = db
            .map_styles()
            .create(CreateMapStyle {
                user_id: user.id,
                name: "Night".into(),
                style: style.clone(),
                is_default: true,
            })
            .await
            .unwrap();

        let listed = db.map_styles().list_all().await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(listed[0].style, style);
        assert!(listed[0].is_default);
        assert_eq!(created.created_at, created.updated_at);
    }
}
