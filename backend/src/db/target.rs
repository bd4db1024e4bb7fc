//! Exclusive parent reference shared by favorites and comments

use anyhow::anyhow;

use super::error::{DbError, DbResult};

/// The single place or route a favorite or comment is attached to.
///
/// Stored as two nullable columns (`place_id`, `route_id`); at most one is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    Place(String),
    Route(String),
}

impl TargetRef {
    /// Build from the optional ids supplied by a client.
    ///
    /// Supplying both is rejected; supplying neither yields `None` and it is up
    /// to the caller whether that is acceptable.
    pub fn from_ids(place_id: Option<String>, route_id: Option<String>) -> DbResult<Option<Self>> {
        match (place_id, route_id) {
            (Some(_), Some(_)) => Err(DbError::ConstraintViolation(
                "placeId and routeId are mutually exclusive".to_string(),
            )),
            (Some(place), None) => Ok(Some(Self::Place(place))),
            (None, Some(route)) => Ok(Some(Self::Route(route))),
            (None, None) => Ok(None),
        }
    }

    /// Decode the stored column pair
    pub fn from_columns(
        place_id: Option<String>,
        route_id: Option<String>,
    ) -> anyhow::Result<Option<Self>> {
        Self::from_ids(place_id, route_id).map_err(|e| anyhow!("{}", e))
    }

    pub fn place_id(&self) -> Option<&str> {
        match self {
            Self::Place(id) => Some(id),
            Self::Route(_) => None,
        }
    }

    pub fn route_id(&self) -> Option<&str> {
        match self {
            Self::Route(id) => Some(id),
            Self::Place(_) => None,
        }
    }
}

/// `place_id` value for an optional target
pub fn place_column(target: Option<&TargetRef>) -> Option<String> {
    target.and_then(TargetRef::place_id).map(str::to_string)
}

/// `route_id` value for an optional target
pub fn route_column(target: Option<&TargetRef>) -> Option<String> {
    target.and_then(TargetRef::route_id).map(str::to_string)
}
