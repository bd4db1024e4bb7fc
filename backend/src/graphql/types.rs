//! GraphQL object types
//!
//! Each type mirrors a database record. Parent ids are kept on the object (but
//! not exposed) so relation fields can be resolved lazily.

use async_graphql::{ComplexObject, Context, ID, Result, SimpleObject};

use crate::db::{
    CommentRecord, EventRecord, FavoriteRecord, MapRecord, MapStyleRecord, MapWithOwner,
    MediaRecord, NavigationHistoryRecord, PlaceRecord, PlanSubscriptionRecord, RouteRecord,
    TargetRef, TrafficDataRecord, UserRecord, WeatherDataRecord,
};

use super::helpers::{ContextExt, DbResultExt};
use super::scalars::{DateTime, Json};

/// Wrap a related collection the way the schema declares it (`[T!]`)
fn related<R, T: From<R>>(records: Vec<R>) -> Option<Vec<T>> {
    Some(records.into_iter().map(T::from).collect())
}

// ============================================================================
// User
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<UserRecord> for User {
    fn from(r: UserRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            email: r.email,
            role: r.role,
        }
    }
}

#[ComplexObject]
impl User {
    async fn maps(&self, ctx: &Context<'_>) -> Result<Option<Vec<Map>>> {
        let records = ctx.db().maps().list_by("owner_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    /// Billing plan subscriptions
    async fn subscriptions(&self, ctx: &Context<'_>) -> Result<Option<Vec<PlanSubscription>>> {
        let records = ctx
            .db()
            .plan_subscriptions()
            .list_by("user_id", &self.id)
            .await
            .into_gql()?;
        Ok(related(records))
    }

    async fn favorites(&self, ctx: &Context<'_>) -> Result<Option<Vec<Favorite>>> {
        let records = ctx.db().favorites().list_by("user_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn history(&self, ctx: &Context<'_>) -> Result<Option<Vec<NavigationHistory>>> {
        let records = ctx
            .db()
            .navigation_history()
            .list_by("user_id", &self.id)
            .await
            .into_gql()?;
        Ok(related(records))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let records = ctx.db().comments().list_by("user_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn styles(&self, ctx: &Context<'_>) -> Result<Option<Vec<MapStyle>>> {
        let records = ctx.db().map_styles().list_by("user_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }
}

async fn load_user(ctx: &Context<'_>, id: &str) -> Result<User> {
    ctx.db().users().require(id).await.map(User::from).into_gql()
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Map {
    pub id: ID,
    pub name: String,
    #[graphql(name = "type")]
    pub map_type: String,
    #[graphql(skip)]
    pub owner_id: String,
    /// Owner loaded together with the map, if any
    #[graphql(skip)]
    pub owner: Option<User>,
}

impl From<MapRecord> for Map {
    fn from(r: MapRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            map_type: r.map_type,
            owner_id: r.owner_id,
            owner: None,
        }
    }
}

impl From<MapWithOwner> for Map {
    fn from(r: MapWithOwner) -> Self {
        Self {
            owner: Some(User::from(r.owner)),
            ..Map::from(r.map)
        }
    }
}

#[ComplexObject]
impl Map {
    #[graphql(name = "owner")]
    async fn owner_field(&self, ctx: &Context<'_>) -> Result<User> {
        match &self.owner {
            Some(owner) => Ok(owner.clone()),
            None => load_user(ctx, &self.owner_id).await,
        }
    }

    async fn places(&self, ctx: &Context<'_>) -> Result<Option<Vec<Place>>> {
        let records = ctx.db().places().list_by("map_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn routes(&self, ctx: &Context<'_>) -> Result<Option<Vec<Route>>> {
        let records = ctx.db().routes().list_by("map_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn traffic(&self, ctx: &Context<'_>) -> Result<Option<Vec<TrafficData>>> {
        let records = ctx.db().traffic().list_by("map_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn weather(&self, ctx: &Context<'_>) -> Result<Option<Vec<WeatherData>>> {
        let records = ctx.db().weather().list_by("map_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn events(&self, ctx: &Context<'_>) -> Result<Option<Vec<Event>>> {
        let records = ctx.db().events().list_by("map_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }
}

async fn load_map(ctx: &Context<'_>, id: &str) -> Result<Map> {
    ctx.db().maps().require(id).await.map(Map::from).into_gql()
}

async fn load_place(ctx: &Context<'_>, id: Option<&str>) -> Result<Option<Place>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let record = ctx.db().places().get_by_id(id).await.into_gql()?;
    Ok(record.map(Place::from))
}

async fn load_route(ctx: &Context<'_>, id: Option<&str>) -> Result<Option<Route>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let record = ctx.db().routes().get_by_id(id).await.into_gql()?;
    Ok(record.map(Route::from))
}

// ============================================================================
// Place / Route
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Place {
    pub id: ID,
    pub name: String,
    #[graphql(name = "type")]
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[graphql(skip)]
    pub map_id: String,
}

impl From<PlaceRecord> for Place {
    fn from(r: PlaceRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            place_type: r.place_type,
            latitude: r.latitude,
            longitude: r.longitude,
            map_id: r.map_id,
        }
    }
}

#[ComplexObject]
impl Place {
    async fn map(&self, ctx: &Context<'_>) -> Result<Map> {
        load_map(ctx, &self.map_id).await
    }

    async fn media(&self, ctx: &Context<'_>) -> Result<Option<Vec<Media>>> {
        let records = ctx.db().media().list_by("place_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let records = ctx.db().comments().list_by("place_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn favorites(&self, ctx: &Context<'_>) -> Result<Option<Vec<Favorite>>> {
        let records = ctx.db().favorites().list_by("place_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Route {
    pub id: ID,
    pub name: String,
    pub origin_id: String,
    pub destination_id: String,
    pub distance: f64,
    pub duration: i32,
    #[graphql(skip)]
    pub map_id: String,
}

impl From<RouteRecord> for Route {
    fn from(r: RouteRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            origin_id: r.origin_id,
            destination_id: r.destination_id,
            distance: r.distance,
            duration: r.duration,
            map_id: r.map_id,
        }
    }
}

#[ComplexObject]
impl Route {
    async fn map(&self, ctx: &Context<'_>) -> Result<Map> {
        load_map(ctx, &self.map_id).await
    }

    async fn comments(&self, ctx: &Context<'_>) -> Result<Option<Vec<Comment>>> {
        let records = ctx.db().comments().list_by("route_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }

    async fn favorites(&self, ctx: &Context<'_>) -> Result<Option<Vec<Favorite>>> {
        let records = ctx.db().favorites().list_by("route_id", &self.id).await.into_gql()?;
        Ok(related(records))
    }
}

// ============================================================================
// Favorite / Comment (attached to a place or a route)
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Favorite {
    pub id: ID,
    #[graphql(skip)]
    pub user_id: String,
    #[graphql(skip)]
    pub target: TargetRef,
}

impl From<FavoriteRecord> for Favorite {
    fn from(r: FavoriteRecord) -> Self {
        Self {
            id: ID(r.id),
            user_id: r.user_id,
            target: r.target,
        }
    }
}

#[ComplexObject]
impl Favorite {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        load_user(ctx, &self.user_id).await
    }

    async fn place(&self, ctx: &Context<'_>) -> Result<Option<Place>> {
        load_place(ctx, self.target.place_id()).await
    }

    async fn route(&self, ctx: &Context<'_>) -> Result<Option<Route>> {
        load_route(ctx, self.target.route_id()).await
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Comment {
    pub id: ID,
    pub text: String,
    pub rating: i32,
    #[graphql(skip)]
    pub user_id: String,
    #[graphql(skip)]
    pub target: Option<TargetRef>,
}

impl From<CommentRecord> for Comment {
    fn from(r: CommentRecord) -> Self {
        Self {
            id: ID(r.id),
            text: r.text,
            rating: r.rating,
            user_id: r.user_id,
            target: r.target,
        }
    }
}

#[ComplexObject]
impl Comment {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        load_user(ctx, &self.user_id).await
    }

    async fn place(&self, ctx: &Context<'_>) -> Result<Option<Place>> {
        load_place(ctx, self.target.as_ref().and_then(TargetRef::place_id)).await
    }

    async fn route(&self, ctx: &Context<'_>) -> Result<Option<Route>> {
        load_route(ctx, self.target.as_ref().and_then(TargetRef::route_id)).await
    }
}

// ============================================================================
// Billing subscription
// ============================================================================

/// A user's billing plan (exposed as `Subscription`)
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Subscription", complex)]
pub struct PlanSubscription {
    pub id: ID,
    pub plan_type: String,
    pub expiration: DateTime,
    #[graphql(skip)]
    pub user_id: String,
}

impl From<PlanSubscriptionRecord> for PlanSubscription {
    fn from(r: PlanSubscriptionRecord) -> Self {
        Self {
            id: ID(r.id),
            plan_type: r.plan_type,
            expiration: DateTime(r.expiration),
            user_id: r.user_id,
        }
    }
}

#[ComplexObject]
impl PlanSubscription {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        load_user(ctx, &self.user_id).await
    }
}

// ============================================================================
// Telemetry
// ============================================================================

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct TrafficData {
    pub id: ID,
    pub traffic_level: String,
    pub timestamp: DateTime,
    #[graphql(skip)]
    pub map_id: String,
}

impl From<TrafficDataRecord> for TrafficData {
    fn from(r: TrafficDataRecord) -> Self {
        Self {
            id: ID(r.id),
            traffic_level: r.traffic_level,
            timestamp: DateTime(r.timestamp),
            map_id: r.map_id,
        }
    }
}

#[ComplexObject]
impl TrafficData {
    async fn map(&self, ctx: &Context<'_>) -> Result<Map> {
        load_map(ctx, &self.map_id).await
    }
}

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct WeatherData {
    pub id: ID,
    pub temperature: f64,
    pub conditions: String,
    pub timestamp: DateTime,
    #[graphql(skip)]
    pub map_id: String,
}

impl From<WeatherDataRecord> for WeatherData {
    fn from(r: WeatherDataRecord) -> Self {
        Self {
            id: ID(r.id),
            temperature: r.temperature,
            conditions: r.conditions,
            timestamp: DateTime(r.timestamp),
            map_id: r.map_id,
        }
    }
}

#[ComplexObject]
impl WeatherData {
    async fn map(&self, ctx: &Context<'_>) -> Result<Map> {
        load_map(ctx, &self.map_id).await
    }
}

// ============================================================================
// Media / history / styles / events
// ============================================================================

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Media {
    pub id: ID,
    pub url: String,
    #[graphql(name = "type")]
    pub media_type: String,
    #[graphql(skip)]
    pub place_id: Option<String>,
}

impl From<MediaRecord> for Media {
    fn from(r: MediaRecord) -> Self {
        Self {
            id: ID(r.id),
            url: r.url,
            media_type: r.media_type,
            place_id: r.place_id,
        }
    }
}

#[ComplexObject]
impl Media {
    async fn place(&self, ctx: &Context<'_>) -> Result<Option<Place>> {
        load_place(ctx, self.place_id.as_deref()).await
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct NavigationHistory {
    pub id: ID,
    pub timestamp: DateTime,
    pub action: String,
    pub details: Option<String>,
    #[graphql(skip)]
    pub user_id: String,
}

impl From<NavigationHistoryRecord> for NavigationHistory {
    fn from(r: NavigationHistoryRecord) -> Self {
        Self {
            id: ID(r.id),
            timestamp: DateTime(r.timestamp),
            action: r.action,
            details: r.details,
            user_id: r.user_id,
        }
    }
}

#[ComplexObject]
impl NavigationHistory {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        load_user(ctx, &self.user_id).await
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct MapStyle {
    pub id: ID,
    pub name: String,
    pub style: Json,
    pub is_default: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[graphql(skip)]
    pub user_id: String,
}

impl From<MapStyleRecord> for MapStyle {
    fn from(r: MapStyleRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            style: Json(r.style),
            is_default: r.is_default,
            created_at: DateTime(r.created_at),
            updated_at: DateTime(r.updated_at),
            user_id: r.user_id,
        }
    }
}

#[ComplexObject]
impl MapStyle {
    async fn user(&self, ctx: &Context<'_>) -> Result<User> {
        load_user(ctx, &self.user_id).await
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Event {
    pub id: ID,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime,
    pub end_time: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[graphql(skip)]
    pub map_id: String,
}

impl From<EventRecord> for Event {
    fn from(r: EventRecord) -> Self {
        Self {
            id: ID(r.id),
            name: r.name,
            description: r.description,
            start_time: DateTime(r.start_time),
            end_time: DateTime(r.end_time),
            created_at: DateTime(r.created_at),
            updated_at: DateTime(r.updated_at),
            map_id: r.map_id,
        }
    }
}

#[ComplexObject]
impl Event {
    async fn map(&self, ctx: &Context<'_>) -> Result<Map> {
        load_map(ctx, &self.map_id).await
    }
}
