//! Users repository
//!
//! Users own maps, billing subscriptions, favorites, navigation history,
//! comments and map styles.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::new_id;

/// Role assigned to every newly created user
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl sqlx::FromRow<'_, SqliteRow> for UserRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: row.try_get("role")?,
        })
    }
}

impl DatabaseEntity for UserRecord {
    const TABLE_NAME: &'static str = "users";
    const ENTITY_NAME: &'static str = "User";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("name"),
        ColumnDef::text("email").unique(),
        ColumnDef::text("password_hash"),
        ColumnDef::text("role").default("'user'"),
    ];
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

pub type UserRepository = Repository<UserRecord>;

impl Repository<UserRecord> {
    /// Create a new user
    pub async fn create(&self, input: CreateUser) -> DbResult<UserRecord> {
        let values = Changes::new()
            .set("name", input.name)
            .set("email", input.email)
            .set("password_hash", input.password_hash)
            .set("role", input.role);
        self.insert(&new_id(), values).await
    }

    /// Update the supplied fields of a user
    pub async fn update(&self, id: &str, input: UpdateUser) -> DbResult<UserRecord> {
        let changes = Changes::new()
            .set_some("name", input.name)
            .set_some("email", input.email)
            .set_some("password_hash", input.password_hash);
        self.update_columns(id, changes).await
    }
}
