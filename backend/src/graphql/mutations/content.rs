use super::prelude::*;

#[derive(Default)]
pub struct ContentMutations;

#[Object]
impl ContentMutations {
    /// Comment on a place, a route, or nothing in particular (never both)
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        text: String,
        rating: i32,
        place_id: Option<ID>,
        route_id: Option<ID>,
    ) -> Result<Comment> {
        let target =
            TargetRef::from_ids(place_id.map(|id| id.0), route_id.map(|id| id.0)).into_gql()?;

        let record = ctx
            .db()
            .comments()
            .create(CreateComment {
                user_id: user_id.0,
                text,
                rating,
                target,
            })
            .await
            .into_gql()?;

        tracing::info!(comment_id = %record.id, target = ?record.target, "Comment created");
        Ok(Comment::from(record))
    }

    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: ID,
        text: Option<String>,
        rating: Option<i32>,
    ) -> Result<Comment> {
        let record = ctx
            .db()
            .comments()
            .update(&id, UpdateComment { text, rating })
            .await
            .into_gql()?;

        tracing::debug!(comment_id = %record.id, "Comment updated");
        Ok(Comment::from(record))
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: ID) -> Result<Comment> {
        let record = ctx.db().comments().delete(&id).await.into_gql()?;
        tracing::info!(comment_id = %record.id, "Comment deleted");
        Ok(Comment::from(record))
    }

    async fn create_media(
        &self,
        ctx: &Context<'_>,
        url: String,
        #[graphql(name = "type")] media_type: String,
        place_id: ID,
    ) -> Result<Media> {
        let record = ctx
            .db()
            .media()
            .create(url, media_type, Some(place_id.0))
            .await
            .into_gql()?;

        tracing::info!(media_id = %record.id, "Media created");
        Ok(Media::from(record))
    }

    async fn delete_media(&self, ctx: &Context<'_>, id: ID) -> Result<Media> {
        let record = ctx.db().media().delete(&id).await.into_gql()?;
        tracing::info!(media_id = %record.id, "Media deleted");
        Ok(Media::from(record))
    }
}
