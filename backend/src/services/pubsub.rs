//! Topic-based broadcast service for live telemetry updates
//!
//! Constructed once at start-up and handed to the GraphQL schema as data.
//! Publishing never blocks: a subscriber that falls more than the channel
//! capacity behind misses the overflowed events.

use tokio::sync::broadcast;
use tracing::debug;

use crate::db::{TrafficDataRecord, WeatherDataRecord};

/// Broadcast channel capacity used when none is configured
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Named broadcast channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    TrafficUpdated,
    WeatherUpdated,
}

impl Topic {
    /// Wire name of the topic
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::TrafficUpdated => "TRAFFIC_UPDATED",
            Topic::WeatherUpdated => "WEATHER_UPDATED",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried on a topic
#[derive(Debug, Clone, PartialEq)]
pub enum TopicEvent {
    TrafficUpdated(TrafficDataRecord),
    WeatherUpdated(WeatherDataRecord),
}

impl TopicEvent {
    /// The topic this event is published on
    pub fn topic(&self) -> Topic {
        match self {
            TopicEvent::TrafficUpdated(_) => Topic::TrafficUpdated,
            TopicEvent::WeatherUpdated(_) => Topic::WeatherUpdated,
        }
    }
}

/// Pub/sub configuration
#[derive(Debug, Clone)]
pub struct PubSubConfig {
    /// Per-topic broadcast buffer
    pub channel_capacity: usize,
}

impl Default for PubSubConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// In-process broadcast registry, one channel per topic
pub struct PubSub {
    traffic_tx: broadcast::Sender<TopicEvent>,
    weather_tx: broadcast::Sender<TopicEvent>,
}

impl PubSub {
    pub fn new(config: PubSubConfig) -> Self {
        let capacity = config.channel_capacity.max(1);
        let (traffic_tx, _) = broadcast::channel(capacity);
        let (weather_tx, _) = broadcast::channel(capacity);

        Self {
            traffic_tx,
            weather_tx,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<TopicEvent> {
        match topic {
            Topic::TrafficUpdated => &self.traffic_tx,
            Topic::WeatherUpdated => &self.weather_tx,
        }
    }

    /// Publish an event on its topic and return how many subscribers got it
    pub fn publish(&self, event: TopicEvent) -> usize {
        let topic = event.topic();
        // Sending only fails when nobody is listening.
        let receivers = self.sender(topic).send(event).unwrap_or(0);
        debug!(topic = %topic, receivers, "Published event");
        receivers
    }

    /// Start receiving every event published on `topic` from now on
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<TopicEvent> {
        debug!(topic = %topic, "New subscriber");
        self.sender(topic).subscribe()
    }

    /// Number of live receivers on `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for PubSub {
    fn default() -> Self {
        Self::new(PubSubConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    fn traffic(level: &str) -> TrafficDataRecord {
        TrafficDataRecord {
            id: format!("t-{}", level),
            traffic_level: level.to_string(),
            timestamp: Utc::now(),
            map_id: "m1".to_string(),
        }
    }

    fn weather() -> WeatherDataRecord {
        WeatherDataRecord {
            id: "w1".to_string(),
            temperature: 12.0,
            conditions: "rain".to_string(),
            timestamp: Utc::now(),
            map_id: "m1".to_string(),
        }
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(Topic::TrafficUpdated.as_str(), "TRAFFIC_UPDATED");
        assert_eq!(Topic::WeatherUpdated.to_string(), "WEATHER_UPDATED");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let pubsub = PubSub::default();
        assert_eq!(pubsub.publish(TopicEvent::TrafficUpdated(traffic("low"))), 0);
    }

    #[tokio::test]
    async fn test_events_stay_on_their_topic() {
        let pubsub = PubSub::default();
        let mut traffic_rx = pubsub.subscribe(Topic::TrafficUpdated);
        let mut weather_rx = pubsub.subscribe(Topic::WeatherUpdated);

        let sample = traffic("high");
        assert_eq!(pubsub.publish(TopicEvent::TrafficUpdated(sample.clone())), 1);

        assert_eq!(
            traffic_rx.recv().await.unwrap(),
            TopicEvent::TrafficUpdated(sample)
        );
        assert_matches!(weather_rx.try_recv(), Err(TryRecvError::Empty));

        pubsub.publish(TopicEvent::WeatherUpdated(weather()));
        assert_matches!(weather_rx.recv().await, Ok(TopicEvent::WeatherUpdated(_)));
        assert_matches!(traffic_rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_publish_order_and_no_replay() {
        let pubsub = PubSub::default();
        pubsub.publish(TopicEvent::TrafficUpdated(traffic("before")));

        let mut rx = pubsub.subscribe(Topic::TrafficUpdated);
        for level in ["low", "medium", "high"] {
            pubsub.publish(TopicEvent::TrafficUpdated(traffic(level)));
        }

        for level in ["low", "medium", "high"] {
            assert_matches!(
                rx.recv().await,
                Ok(TopicEvent::TrafficUpdated(t)) if t.traffic_level == level
            );
        }
    }

    #[tokio::test]
    async fn test_slow_subscriber_misses_overflow() {
        let pubsub = PubSub::new(PubSubConfig {
            channel_capacity: 2,
        });
        let mut rx = pubsub.subscribe(Topic::TrafficUpdated);

        for level in ["a", "b", "c"] {
            pubsub.publish(TopicEvent::TrafficUpdated(traffic(level)));
        }

        assert_matches!(rx.recv().await, Err(RecvError::Lagged(1)));
        assert_matches!(
            rx.recv().await,
            Ok(TopicEvent::TrafficUpdated(t)) if t.traffic_level == "b"
        );
    }

    #[test]
    fn test_subscriber_count_tracks_drops() {
        let pubsub = PubSub::default();
        let rx = pubsub.subscribe(Topic::WeatherUpdated);
        assert_eq!(pubsub.subscriber_count(Topic::WeatherUpdated), 1);
        assert_eq!(pubsub.subscriber_count(Topic::TrafficUpdated), 0);
        drop(rx);
        assert_eq!(pubsub.subscriber_count(Topic::WeatherUpdated), 0);
    }
}
