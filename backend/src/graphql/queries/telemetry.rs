use super::prelude::*;

#[derive(Default)]
pub struct TelemetryQueries;

#[Object]
impl TelemetryQueries {
    /// All traffic samples
    async fn traffic_data(&self, ctx: &Context<'_>) -> Result<Option<Vec<TrafficData>>> {
        let records = ctx.db().traffic().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(TrafficData::from).collect()))
    }

    /// All weather samples
    async fn weather_data(&self, ctx: &Context<'_>) -> Result<Option<Vec<WeatherData>>> {
        let records = ctx.db().weather().list_all().await.into_gql()?;
        Ok(Some(records.into_iter().map(WeatherData::from).collect()))
    }
}
