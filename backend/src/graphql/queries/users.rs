use super::prelude::*;

/// Collections owned by users
#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// All users
    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let records = ctx.db().users().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(User::from).collect()))
    }

    /// All billing plan subscriptions
    async fn subscriptions(&self, ctx: &Context<'_>) -> Result<Option<Vec<PlanSubscription>>> {
        let records = ctx.db().plan_subscriptions().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(PlanSubscription::from).collect()))
    }

    /// All favorites
    async fn favorites(&self, ctx: &Context<'_>) -> Result<Option<Vec<Favorite>>> {
        let records = ctx.db().favorites().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Favorite::from).collect()))
    }

    /// All navigation history entries
    async fn navigation_history(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<Vec<NavigationHistory>>> {
        let records = ctx.db().navigation_history().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(NavigationHistory::from).collect()))
    }

    /// All map styles
    async fn map_styles(&self, ctx: &Context<'_>) -> Result<Option<Vec<MapStyle>>> {
        let records = ctx.db().map_styles().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(MapStyle::from).collect()))
    }
}
