//! Maps repository

use sqlx::{FromRow, Row};
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::new_id;
use super::users::UserRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct MapRecord {
    pub id: String,
    pub name: String,
    pub map_type: String,
    pub owner_id: String,
}

impl FromRow<'_, SqliteRow> for MapRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            map_type: row.try_get("type")?,
            owner_id: row.try_get("owner_id")?,
        })
    }
}

impl DatabaseEntity for MapRecord {
    const TABLE_NAME: &'static str = "maps";
    const ENTITY_NAME: &'static str = "Map";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("name"),
        ColumnDef::text("type"),
        ColumnDef::text("owner_id").references("users"),
    ];
}

/// A map joined with the user that owns it
#[derive(Debug, Clone, PartialEq)]
pub struct MapWithOwner {
    pub map: MapRecord,
    pub owner: UserRecord,
}

impl FromRow<'_, SqliteRow> for MapWithOwner {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            map: MapRecord::from_row(row)?,
            owner: UserRecord {
                id: row.try_get("owner_id")?,
                name: row.try_get("owner_name")?,
                email: row.try_get("owner_email")?,
                password_hash: row.try_get("owner_password_hash")?,
                role: row.try_get("owner_role")?,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateMap {
    pub name: String,
    pub map_type: String,
    pub owner_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMap {
    pub name: Option<String>,
    pub map_type: Option<String>,
}

pub type MapRepository = Repository<MapRecord>;

impl Repository<MapRecord> {
    pub async fn create(&self, input: CreateMap) -> DbResult<MapRecord> {
        let values = Changes::new()
            .set("name", input.name)
            .set("type", input.map_type)
            .set("owner_id", input.owner_id);
        self.insert(&new_id(), values).await
    }

    pub async fn update(&self, id: &str, input: UpdateMap) -> DbResult<MapRecord> {
        let changes = Changes::new()
            .set_some("name", input.name)
            .set_some("type", input.map_type);
        self.update_columns(id, changes).await
    }

    /// All maps with their owners loaded in the same query
    pub async fn list_with_owner(&self) -> DbResult<Vec<MapWithOwner>> {
        let rows = sqlx::query_as::<_, MapWithOwner>(
            r#"
            SELECT m.id, m.name, m.type, m.owner_id,
                   u.name AS owner_name, u.email AS owner_email,
                   u.password_hash AS owner_password_hash, u.role AS owner_role
            FROM maps m
            JOIN users u ON u.id = m.owner_id
            ORDER BY m.rowid
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::db::test_support::{seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_links_owner() {
        let db = test_db().await;
        let owner = seed_user(&db, "u1@example.com").await;

        let map = db
            .maps()
            .create(CreateMap {
                name: "City A".into(),
                map_type: "road".into(),
                owner_id: owner.id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(map.name, "City A");
        assert_eq!(map.map_type, "road");
        assert_eq!(map.owner_id, owner.id);
        assert!(!map.id.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_unknown_owner_fails() {
        let db = test_db().await;
        let err = db
            .maps()
            .create(CreateMap {
                name: "Orphan".into(),
                map_type: "road".into(),
                owner_id: "nobody".into(),
            })
            .await
            .unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));
        assert!(db.maps().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_with_owner() {
        let db = test_db().await;
        let owner = seed_user(&db, "u1@example.com").await;
        let first = db
            .maps()
            .create(CreateMap {
                name: "First".into(),
                map_type: "road".into(),
                owner_id: owner.id.clone(),
            })
            .await
            .unwrap();
        let second = db
            .maps()
            .create(CreateMap {
                name: "Second".into(),
                map_type: "satellite".into(),
                owner_id: owner.id.clone(),
            })
            .await
            .unwrap();

        let listed = db.maps().list_with_owner().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].map, first);
        assert_eq!(listed[1].map, second);
        assert_eq!(listed[0].owner, owner);
    }

    #[tokio::test]
    async fn test_update_type_only() {
        let db = test_db().await;
        let owner = seed_user(&db, "u1@example.com").await;
        let map = db
            .maps()
            .create(CreateMap {
                name: "Keep".into(),
                map_type: "road".into(),
                owner_id: owner.id,
            })
            .await
            .unwrap();

        let updated = db
            .maps()
            .update(
                &map.id,
                UpdateMap {
                    map_type: Some("terrain".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Keep");
        assert_eq!(updated.map_type, "terrain");
    }
}
