use super::prelude::*;

#[derive(Default)]
pub struct ContentQueries;

#[Object]
impl ContentQueries {
    /// All comments
    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let records = ctx.db().comments().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Comment::from).collect()))
    }

    /// All media
    async fn media(&self, ctx: &Context<'_>) -> Result<Option<Vec<Media>>> {
        let records = ctx.db().media().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Media::from).collect()))
    }
}
