//! Comments with a rating, optionally attached to a place or a route

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{decode_err, new_id};
use super::target::{TargetRef, place_column, route_column};

#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub rating: i32,
    pub target: Option<TargetRef>,
}

impl sqlx::FromRow<'_, SqliteRow> for CommentRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            text: row.try_get("text")?,
            rating: row.try_get("rating")?,
            target: TargetRef::from_columns(row.try_get("place_id")?, row.try_get("route_id")?)
                .map_err(decode_err)?,
        })
    }
}

impl DatabaseEntity for CommentRecord {
    const TABLE_NAME: &'static str = "comments";
    const ENTITY_NAME: &'static str = "Comment";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("user_id").references("users"),
        ColumnDef::text("text"),
        ColumnDef::integer("rating"),
        ColumnDef::text("place_id").nullable().references("places"),
        ColumnDef::text("route_id").nullable().references("routes"),
    ];
    const CHECKS: &'static [&'static str] = &["place_id IS NULL OR route_id IS NULL"];
}

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub user_id: String,
    pub text: String,
    pub rating: i32,
    pub target: Option<TargetRef>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateComment {
    pub text: Option<String>,
    pub rating: Option<i32>,
}

pub type CommentRepository = Repository<CommentRecord>;

impl Repository<CommentRecord> {
    pub async fn create(&self, input: CreateComment) -> DbResult<CommentRecord> {
        let values = Changes::new()
            .set("user_id", input.user_id)
            .set("text", input.text)
            .set("rating", input.rating)
            .set("place_id", place_column(input.target.as_ref()))
            .set("route_id", route_column(input.target.as_ref()));
        self.insert(&new_id(), values).await
    }

    pub async fn update(&self, id: &str, input: UpdateComment) -> DbResult<CommentRecord> {
        let changes = Changes::new()
            .set_some("text", input.text)
            .set_some("rating", input.rating);
        self.update_columns(id, changes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::db::routes::CreateRoute;
    use crate::db::test_support::{seed_map, seed_user, test_db};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_free_standing_comment() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;

        let comment = db
            .comments()
            .create(CreateComment {
                user_id: user.id.clone(),
                text: "Great app".into(),
                rating: 5,
                target: None,
            })
            .await
            .unwrap();

        assert_eq!(comment.target, None);
        assert_eq!(db.comments().list_all().await.unwrap(), vec![comment]);
    }

    #[tokio::test]
    async fn test_route_comment_and_partial_update() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;
        let route = db
            .routes()
            .create(CreateRoute {
                name: "Ring".into(),
                origin_id: "a".into(),
                destination_id: "b".into(),
                distance: 3.0,
                duration: 600,
                map_id: map.id,
            })
            .await
            .unwrap();

        let comment = db
            .comments()
            .create(CreateComment {
                user_id: user.id,
                text: "Scenic".into(),
                rating: 4,
                target: Some(TargetRef::Route(route.id.clone())),
            })
            .await
            .unwrap();

        let updated = db
            .comments()
            .update(
                &comment.id,
                UpdateComment {
                    rating: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "Scenic");
        assert_eq!(updated.rating, 2);
        assert_eq!(updated.target, Some(TargetRef::Route(route.id)));
    }

    #[tokio::test]
    async fn test_route_with_comments_cannot_be_deleted() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let map = seed_map(&db, &user.id).await;
        let route = db
            .routes()
            .create(CreateRoute {
                name: "Ring".into(),
                origin_id: "a".into(),
                destination_id: "b".into(),
                distance: 3.0,
                duration: 600,
                map_id: map.id,
            })
            .await
            .unwrap();
        db.comments()
            .create(CreateComment {
                user_id: user.id,
                text: "Busy".into(),
                rating: 1,
                target: Some(TargetRef::Route(route.id.clone())),
            })
            .await
            .unwrap();

        let err = db.routes().delete(&route.id).await.unwrap_err();
        assert_matches!(err, DbError::ConstraintViolation(_));
        assert!(db.routes().get_by_id(&route.id).await.unwrap().is_some());
    }
}
