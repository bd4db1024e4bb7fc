//! Long-lived services shared by the resolvers

pub mod passwords;
pub mod pubsub;

pub use passwords::PasswordHasher;
pub use pubsub::{PubSub, PubSubConfig, Topic, TopicEvent};
