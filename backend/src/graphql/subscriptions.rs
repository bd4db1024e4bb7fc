//! GraphQL subscriptions for real-time updates
//!
//! Subscriptions allow clients to receive push updates over WebSocket. Each
//! stream yields every event published after it was opened; nothing is replayed.

use std::sync::Arc;

use async_graphql::{Context, Subscription};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use crate::services::{PubSub, Topic, TopicEvent};

use super::types::{TrafficData, WeatherData};

/// Events on `topic` as a stream, dropping (and logging) anything a slow
/// subscriber missed
fn topic_stream(
    pubsub: &PubSub,
    topic: Topic,
) -> impl Stream<Item = TopicEvent> + Send + 'static {
    BroadcastStream::new(pubsub.subscribe(topic)).filter_map(move |result| match result {
        Ok(event) => Some(event),
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            tracing::warn!(topic = %topic, missed, "Subscriber lagged, events dropped");
            None
        }
    })
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Every traffic sample created from now on
    async fn traffic_updated<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> impl Stream<Item = TrafficData> + 'ctx {
        let pubsub = ctx.data_unchecked::<Arc<PubSub>>();

        topic_stream(pubsub, Topic::TrafficUpdated).filter_map(|event| match event {
            TopicEvent::TrafficUpdated(record) => Some(TrafficData::from(record)),
            _ => None,
        })
    }

    /// Every weather sample created from now on
    async fn weather_updated<'ctx>(
        &self,
        ctx: &Context<'ctx>,
    ) -> impl Stream<Item = WeatherData> + 'ctx {
        let pubsub = ctx.data_unchecked::<Arc<PubSub>>();

        topic_stream(pubsub, Topic::WeatherUpdated).filter_map(|event| match event {
            TopicEvent::WeatherUpdated(record) => Some(WeatherData::from(record)),
            _ => None,
        })
    }
}
