use super::prelude::*;

/// Maps and the things placed on them
#[derive(Default)]
pub struct MapQueries;

#[Object]
impl MapQueries {
    /// All maps, each with its owner already loaded
    async fn maps(&self, ctx: &Context<'_>) -> Result<Option<Vec<Map>>> {
        let records = ctx.db().maps().list_with_owner().await.into_gql()?;
        Ok(Some(records.into_iter().map(Map::from).collect()))
    }

    /// All places
    async fn places(&self, ctx: &Context<'_>) -> Result<Option<Vec<Place>>> {
        let records = ctx.db().places().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Place::from).collect()))
    }

    /// All routes
    async fn routes(&self, ctx: &Context<'_>) -> Result<Option<Vec<Route>>> {
        let records = ctx.db().routes().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Route::from).collect()))
    }

    /// All events
    async fn events(&self, ctx: &Context<'_>) -> Result<Option<Vec<Event>>> {
        let records = ctx.db().events().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(Event::from).collect()))
    }
}
