//! Media (photos, videos) linked to places

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::new_id;

#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    pub id: String,
    pub url: String,
    pub media_type: String,
    pub place_id: Option<String>,
}

impl sqlx::FromRow<'_, SqliteRow> for MediaRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            url: row.try_get("url")?,
            media_type: row.try_get("type")?,
            place_id: row.try_get("place_id")?,
        })
    }
}

impl DatabaseEntity for MediaRecord {
    const TABLE_NAME: &'static str = "media";
    const ENTITY_NAME: &'static str = "Media";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("url"),
        ColumnDef::text("type"),
        // Optional in the data model; createMedia always supplies it.
        ColumnDef::text("place_id").nullable().references("places"),
    ];
}

pub type MediaRepository = Repository<MediaRecord>;

impl Repository<MediaRecord> {
    pub async fn create(
        &self,
        url: String,
        media_type: String,
        place_id: Option<String>,
    ) -> DbResult<MediaRecord> {
        let values = Changes::new()
            .set("url", url)
            .set("type", media_type)
            .set("place_id", place_id);
        self.insert(&new_id(), values).await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::DbError;
    use crate::db::places::CreatePlace;
    use crate::db::test_support::{seed_map, seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_media_for_place() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;
        let place = db
            .places()
            .create(CreatePlace {
                name: "Bridge".into(),
                place_type: "landmark".into(),
                latitude: 10.0,
                longitude: 20.0,
                map_id: map.id,
            })
            .await
            .unwrap();

        let media = db
            .media()
            .create(
                "https://cdn.example.com/bridge.jpg".into(),
                "image".into(),
                Some(place.id.clone()),
            )
            .await
            .unwrap();

        assert_eq!(media.place_id.as_deref(), Some(place.id.as_str()));
        assert_eq!(media.media_type, "image");

        let err = db.places().delete(&place.id).await.unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));

        db.media().delete(&media.id).await.unwrap();
        db.places().delete(&place.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_all_returns_created_media() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;
        let place = db
            .places()
            .create(CreatePlace {
                name: "Pier".into(),
                place_type: "poi".into(),
                latitude: 1.5,
                longitude: 2.5,
                map_id: map.id,
            })
            .await
            .unwrap();

        let photo = db
            .media()
            .create("https://cdn.example.com/pier.jpg".into(), "image".into(), Some(place.id.clone()))
            .await
            .unwrap();
        let clip = db
            .media()
            .create("https://cdn.example.com/pier.mp4".into(), "video".into(), Some(place.id))
            .await
            .unwrap();

        assert_eq!(db.media().list_all().await.unwrap(), vec![photo, clip]);
    }
}
