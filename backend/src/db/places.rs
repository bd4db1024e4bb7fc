//! Places repository

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::new_id;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub map_id: String,
}

impl sqlx::FromRow<'_, SqliteRow> for PlaceRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            place_type: row.try_get("type")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            map_id: row.try_get("map_id")?,
        })
    }
}

impl DatabaseEntity for PlaceRecord {
    const TABLE_NAME: &'static str = "places";
    const ENTITY_NAME: &'static str = "Place";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("name"),
        ColumnDef::text("type"),
        ColumnDef::real("latitude"),
        ColumnDef::real("longitude"),
        ColumnDef::text("map_id").references("maps"),
    ];
}

#[derive(Debug, Clone)]
pub struct CreatePlace {
    pub name: String,
    pub place_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub map_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePlace {
    pub name: Option<String>,
    pub place_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub type PlaceRepository = Repository<PlaceRecord>;

impl Repository<PlaceRecord> {
    pub async fn create(&self, input: CreatePlace) -> DbResult<PlaceRecord> {
        let values = Changes::new()
            .set("name", input.name)
            .set("type", input.place_type)
            .set("latitude", input.latitude)
            .set("longitude", input.longitude)
            .set("map_id", input.map_id);
        self.insert(&new_id(), values).await
    }

    pub async fn update(&self, id: &str, input: UpdatePlace) -> DbResult<PlaceRecord> {
        let changes = Changes::new()
            .set_some("name", input.name)
            .set_some("type", input.place_type)
            .set_some("latitude", input.latitude)
            .set_some("longitude", input.longitude);
        self.update_columns(id, changes).await
    }
}
