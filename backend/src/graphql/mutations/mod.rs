pub mod content;
pub mod maps;
pub mod telemetry;
pub mod users;

pub use content::ContentMutations;
pub use maps::MapMutations;
pub use telemetry::TelemetryMutations;
pub use users::UserMutations;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, ID, Object, Result};

    pub(crate) use crate::db::{
        CreateComment, CreateEvent, CreateMap, CreateMapStyle, CreatePlace, CreateRoute,
        CreateUser, DEFAULT_ROLE, TargetRef, UpdateComment, UpdateEvent, UpdateMap, UpdatePlace,
        UpdateRoute, UpdateUser,
    };
    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::scalars::{DateTime, Json};
    pub(crate) use crate::graphql::types::*;
    pub(crate) use crate::services::TopicEvent;
}
