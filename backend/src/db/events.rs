//! Map events repository (closures, festivals, roadworks, ...)

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{datetime_to_str, decode_err, new_id, str_to_datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub map_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl sqlx::FromRow<'_, SqliteRow> for EventRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let start: String = row.try_get("start_time")?;
        let end: String = row.try_get("end_time")?;
        let created: String = row.try_get("created_at")?;
        let updated: String = row.try_get("updated_at")?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            start_time: str_to_datetime(&start).map_err(decode_err)?,
            end_time: str_to_datetime(&end).map_err(decode_err)?,
            map_id: row.try_get("map_id")?,
            created_at: str_to_datetime(&created).map_err(decode_err)?,
            updated_at: str_to_datetime(&updated).map_err(decode_err)?,
        })
    }
}

impl DatabaseEntity for EventRecord {
    const TABLE_NAME: &'static str = "events";
    const ENTITY_NAME: &'static str = "Event";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("name"),
        ColumnDef::text("description").nullable(),
        ColumnDef::text("start_time"),
        ColumnDef::text("end_time"),
        ColumnDef::text("map_id").references("maps"),
        ColumnDef::text("created_at"),
        ColumnDef::text("updated_at"),
    ];
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub map_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

pub type EventRepository = Repository<EventRecord>;

impl Repository<EventRecord> {
    pub async fn create(&self, input: CreateEvent) -> DbResult<EventRecord> {
        let now = datetime_to_str(Utc::now());
        let values = Changes::new()
            .set("name", input.name)
            .set("description", input.description)
            .set("start_time", datetime_to_str(input.start_time))
            .set("end_time", datetime_to_str(input.end_time))
            .set("map_id", input.map_id)
            .set("created_at", now.clone())
            .set("updated_at", now);
        self.insert(&new_id(), values).await
    }

    /// Update the supplied fields; `updated_at` moves only when something changed
    pub async fn update(&self, id: &str, input: UpdateEvent) -> DbResult<EventRecord> {
        let changes = Changes::new()
            .set_some("name", input.name)
            .set_some("description", input.description)
            .set_some("start_time", input.start_time.map(datetime_to_str))
            .set_some("end_time", input.end_time.map(datetime_to_str));

        let changes = if changes.is_empty() {
            changes
        } else {
            changes.set("updated_at", datetime_to_str(Utc::now()))
        };

        self.update_columns(id, changes).await
    }
}
