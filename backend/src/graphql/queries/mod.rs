pub mod content;
pub mod maps;
pub mod telemetry;
pub mod users;

pub use content::ContentQueries;
pub use maps::MapQueries;
pub use telemetry::TelemetryQueries;
pub use users::UserQueries;

pub(crate) mod prelude {
    pub(crate) use async_graphql::{Context, Object, Result};

    pub(crate) use crate::graphql::helpers::*;
    pub(crate) use crate::graphql::types::*;
}
