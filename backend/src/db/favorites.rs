//! Favorites: a user bookmarking exactly one place or route

use anyhow::anyhow;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::{DbError, DbResult};
use super::sqlite_helpers::{decode_err, new_id};
use super::target::{TargetRef, place_column, route_column};

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub id: String,
    pub user_id: String,
    pub target: TargetRef,
}

impl sqlx::FromRow<'_, SqliteRow> for FavoriteRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let id: String = row.try_get("id")?;
        let target = TargetRef::from_columns(row.try_get("place_id")?, row.try_get("route_id")?)
            .map_err(decode_err)?
            .ok_or_else(|| decode_err(anyhow!("favorite '{}' has no target", id)))?;

        Ok(Self {
            id,
            user_id: row.try_get("user_id")?,
            target,
        })
    }
}

impl DatabaseEntity for FavoriteRecord {
    const TABLE_NAME: &'static str = "favorites";
    const ENTITY_NAME: &'static str = "Favorite";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("user_id").references("users"),
        ColumnDef::text("place_id").nullable().references("places"),
        ColumnDef::text("route_id").nullable().references("routes"),
    ];
    const CHECKS: &'static [&'static str] = &["(place_id IS NULL) <> (route_id IS NULL)"];
}

pub type FavoriteRepository = Repository<FavoriteRecord>;

impl Repository<FavoriteRecord> {
    /// Bookmark a place or a route; a favorite without a target is refused
    pub async fn create(&self, user_id: String, target: Option<TargetRef>) -> DbResult<FavoriteRecord> {
        let target = target.ok_or_else(|| {
            DbError::ConstraintViolation("a favorite needs either placeId or routeId".to_string())
        })?;

        let values = Changes::new()
            .set("user_id", user_id)
            .set("place_id", place_column(Some(&target)))
            .set("route_id", route_column(Some(&target)));
        self.insert(&new_id(), values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::places::CreatePlace;
    use crate::db::test_support::{seed_map, seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_favorite_place() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;
        let place = db
            .places()
            .create(CreatePlace {
                name: "Cafe".into(),
                place_type: "food".into(),
                latitude: 0.0,
                longitude: 0.0,
                map_id: map.id,
            })
            .await
            .unwrap();

        let favorite = db
            .favorites()
            .create(user.id.clone(), Some(TargetRef::Place(place.id.clone())))
            .await
            .unwrap();

        assert_eq!(favorite.target, TargetRef::Place(place.id.clone()));
        assert_eq!(
            db.favorites().list_by("place_id", &place.id).await.unwrap(),
            vec![favorite]
        );
    }

    #[tokio::test]
    async fn test_favorite_without_target_is_rejected() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;

        let err = db.favorites().create(user.id, None).await.unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));
    }

    #[tokio::test]
    async fn test_store_refuses_both_targets() {
        let db = test_db().await;
        let err = sqlx::query(
            "INSERT INTO favorites (id, user_id, place_id, route_id) VALUES ('f', 'u', 'p', 'r')",
        )
        .execute(db.pool())
        .await
        .map_err(DbError::from)
        .unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));
    }
}
