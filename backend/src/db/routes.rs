//! Routes repository
//!
//! Origin and destination are free-form identifiers supplied by the client;
//! they are not foreign keys.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::new_id;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub id: String,
    pub name: String,
    pub origin_id: String,
    pub destination_id: String,
    pub distance: f64,
    pub duration: i32,
    pub map_id: String,
}

impl sqlx::FromRow<'_, SqliteRow> for RouteRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            origin_id: row.try_get("origin_id")?,
            destination_id: row.try_get("destination_id")?,
            distance: row.try_get("distance")?,
            duration: row.try_get("duration")?,
            map_id: row.try_get("map_id")?,
        })
    }
}

impl DatabaseEntity for RouteRecord {
    const TABLE_NAME: &'static str = "routes";
    const ENTITY_NAME: &'static str = "Route";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("name"),
        ColumnDef::text("origin_id"),
        ColumnDef::text("destination_id"),
        ColumnDef::real("distance"),
        ColumnDef::integer("duration"),
        ColumnDef::text("map_id").references("maps"),
    ];
}

#[derive(Debug, Clone)]
pub struct CreateRoute {
    pub name: String,
    pub origin_id: String,
    pub destination_id: String,
    pub distance: f64,
    pub duration: i32,
    pub map_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoute {
    pub name: Option<String>,
    pub distance: Option<f64>,
    pub duration: Option<i32>,
}

pub type RouteRepository = Repository<RouteRecord>;

impl Repository<RouteRecord> {
    pub async fn create(&self, input: CreateRoute) -> DbResult<RouteRecord> {
        let values = Changes::new()
            .set("name", input.name)
            .set("origin_id", input.origin_id)
            .set("destination_id", input.destination_id)
            .set("distance", input.distance)
            .set("duration", input.duration)
            .set("map_id", input.map_id);
        self.insert(&new_id(), values).await
    }

    pub async fn update(&self, id: &str, input: UpdateRoute) -> DbResult<RouteRecord> {
        let changes = Changes::new()
            .set_some("name", input.name)
            .set_some("distance", input.distance)
            .set_some("duration", input.duration);
        self.update_columns(id, changes).await
    }
}
