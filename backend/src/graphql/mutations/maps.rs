use super::prelude::*;

/// Maps and their places, routes and events
#[derive(Default)]
pub struct MapMutations;

#[Object]
impl MapMutations {
    async fn create_map(
        &self,
        ctx: &Context<'_>,
        name: String,
        #[graphql(name = "type")] map_type: String,
        owner_id: ID,
    ) -> Result<Map> {
        let record = ctx
            .db()
            .maps()
            .create(CreateMap {
                name,
                map_type,
                owner_id: owner_id.0,
            })
            .await
            .into_gql()?;

        tracing::info!(map_id = %record.id, owner_id = %record.owner_id, "Map created");
        Ok(Map::from(record))
    }

    async fn update_map(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        #[graphql(name = "type")] map_type: Option<String>,
    ) -> Result<Map> {
        let record = ctx
            .db()
            .maps()
            .update(&id, UpdateMap { name, map_type })
            .await
            .into_gql()?;

        tracing::debug!(map_id = %record.id, "Map updated");
        Ok(Map::from(record))
    }

    /// Delete a map. Fails while places, routes, samples or events still reference it.
    async fn delete_map(&self, ctx: &Context<'_>, id: ID) -> Result<Map> {
        let record = ctx.db().maps().delete(&id).await.into_gql()?;
        tracing::info!(map_id = %record.id, "Map deleted");
        Ok(Map::from(record))
    }

    async fn create_place(
        &self,
        ctx: &Context<'_>,
        name: String,
        #[graphql(name = "type")] place_type: String,
        latitude: f64,
        longitude: f64,
        map_id: ID,
    ) -> Result<Place> {
        let record = ctx
            .db()
            .places()
            .create(CreatePlace {
                name,
                place_type,
                latitude,
                longitude,
                map_id: map_id.0,
            })
            .await
            .into_gql()?;

        tracing::info!(place_id = %record.id, map_id = %record.map_id, "Place created");
        Ok(Place::from(record))
    }

    async fn update_place(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        #[graphql(name = "type")] place_type: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Place> {
        let record = ctx
            .db()
            .places()
            .update(
                &id,
                UpdatePlace {
                    name,
                    place_type,
                    latitude,
                    longitude,
                },
            )
            .await
            .into_gql()?;

        tracing::debug!(place_id = %record.id, "Place updated");
        Ok(Place::from(record))
    }

    async fn delete_place(&self, ctx: &Context<'_>, id: ID) -> Result<Place> {
        let record = ctx.db().places().delete(&id).await.into_gql()?;
        tracing::info!(place_id = %record.id, "Place deleted");
        Ok(Place::from(record))
    }

    async fn create_route(
        &self,
        ctx: &Context<'_>,
        name: String,
        origin_id: ID,
        destination_id: ID,
        distance: f64,
        duration: i32,
        map_id: ID,
    ) -> Result<Route> {
        let record = ctx
            .db()
            .routes()
            .create(CreateRoute {
                name,
                origin_id: origin_id.0,
                destination_id: destination_id.0,
                distance,
                duration,
                map_id: map_id.0,
            })
            .await
            .into_gql()?;

        tracing::info!(route_id = %record.id, map_id = %record.map_id, "Route created");
        Ok(Route::from(record))
    }

    async fn update_route(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        distance: Option<f64>,
        duration: Option<i32>,
    ) -> Result<Route> {
        let record = ctx
            .db()
            .routes()
            .update(
                &id,
                UpdateRoute {
                    name,
                    distance,
                    duration,
                },
            )
            .await
            .into_gql()?;

        tracing::debug!(route_id = %record.id, "Route updated");
        Ok(Route::from(record))
    }

    async fn delete_route(&self, ctx: &Context<'_>, id: ID) -> Result<Route> {
        let record = ctx.db().routes().delete(&id).await.into_gql()?;
        tracing::info!(route_id = %record.id, "Route deleted");
        Ok(Route::from(record))
    }

    async fn create_event(
        &self,
        ctx: &Context<'_>,
        name: String,
        description: Option<String>,
        start_time: DateTime,
        end_time: DateTime,
        map_id: ID,
    ) -> Result<Event> {
        let record = ctx
            .db()
            .events()
            .create(CreateEvent {
                name,
                description,
                start_time: start_time.0,
                end_time: end_time.0,
                map_id: map_id.0,
            })
            .await
            .into_gql()?;

        tracing::info!(event_id = %record.id, map_id = %record.map_id, "Event created");
        Ok(Event::from(record))
    }

    async fn update_event(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        description: Option<String>,
        start_time: Option<DateTime>,
        end_time: Option<DateTime>,
    ) -> Result<Event> {
        let record = ctx
            .db()
            .events()
            .update(
                &id,
                UpdateEvent {
                    name,
                    description,
                    start_time: start_time.map(Into::into),
                    end_time: end_time.map(Into::into),
                },
            )
            .await
            .into_gql()?;

        tracing::debug!(event_id = %record.id, "Event updated");
        Ok(Event::from(record))
    }

    async fn delete_event(&self, ctx: &Context<'_>, id: ID) -> Result<Event> {
        let record = ctx.db().events().delete(&id).await.into_gql()?;
        tracing::info!(event_id = %record.id, "Event deleted");
        Ok(Event::from(record))
    }
}
