use super::prelude::*;

/// Traffic and weather samples. New samples are broadcast to live subscribers.
#[derive(Default)]
pub struct TelemetryMutations;

#[Object]
impl TelemetryMutations {
    /// Record a traffic sample and publish it on `TRAFFIC_UPDATED`
    async fn create_traffic_data(
        &self,
        ctx: &Context<'_>,
        traffic_level: String,
        map_id: ID,
    ) -> Result<TrafficData> {
        let record = ctx
            .db()
            .traffic()
            .create(traffic_level, map_id.0)
            .await
            .into_gql()?;

        let receivers = ctx
            .pubsub()
            .publish(TopicEvent::TrafficUpdated(record.clone()));
        tracing::info!(
            traffic_id = %record.id,
            map_id = %record.map_id,
            level = %record.traffic_level,
            receivers,
            "Traffic sample created"
        );

        Ok(TrafficData::from(record))
    }

    async fn update_traffic_data(
        &self,
        ctx: &Context<'_>,
        id: ID,
        traffic_level: String,
    ) -> Result<TrafficData> {
        let record = ctx
            .db()
            .traffic()
            .update(&id, traffic_level)
            .await
            .into_gql()?;

        tracing::debug!(traffic_id = %record.id, "Traffic sample updated");
        Ok(TrafficData::from(record))
    }

    async fn delete_traffic_data(&self, ctx: &Context<'_>, id: ID) -> Result<TrafficData> {
        let record = ctx.db().traffic().delete(&id).await.into_gql()?;
        tracing::info!(traffic_id = %record.id, "Traffic sample deleted");
        Ok(TrafficData::from(record))
    }

    /// Record a weather sample and publish it on `WEATHER_UPDATED`
    async fn create_weather_data(
        &self,
        ctx: &Context<'_>,
        temperature: f64,
        conditions: String,
        map_id: ID,
    ) -> Result<WeatherData> {
        let record = ctx
            .db()
            .weather()
            .create(temperature, conditions, map_id.0)
            .await
            .into_gql()?;

        let receivers = ctx
            .pubsub()
            .publish(TopicEvent::WeatherUpdated(record.clone()));
        tracing::info!(
            weather_id = %record.id,
            map_id = %record.map_id,
            receivers,
            "Weather sample created"
        );

        Ok(WeatherData::from(record))
    }

    async fn update_weather_data(
        &self,
        ctx: &Context<'_>,
        id: ID,
        temperature: f64,
        conditions: String,
    ) -> Result<WeatherData> {
        let record = ctx
            .db()
            .weather()
            .update(&id, temperature, conditions)
            .await
            .into_gql()?;

        tracing::debug!(weather_id = %record.id, "Weather sample updated");
        Ok(WeatherData::from(record))
    }

    async fn delete_weather_data(&self, ctx: &Context<'_>, id: ID) -> Result<WeatherData> {
        let record = ctx.db().weather().delete(&id).await.into_gql()?;
        tracing::info!(weather_id = %record.id, "Weather sample deleted");
        Ok(WeatherData::from(record))
    }
}
