//! Entity metadata and the generic repository shared by every table
//!
//! Each record type describes its table once (name + column definitions) and
//! decodes itself from a row. Table creation, reads, partial updates and
//! deletes are all derived from that description here.

use std::marker::PhantomData;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};

use super::error::{DbError, DbResult};

/// Column definition for schema generation.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Column name in the database
    pub name: &'static str,
    /// SQLite column type (TEXT, INTEGER, REAL)
    pub sql_type: &'static str,
    /// Whether the column can be NULL
    pub nullable: bool,
    /// Whether this is the primary key
    pub is_primary_key: bool,
    /// Whether values must be unique across rows
    pub unique: bool,
    /// Default value expression (e.g., "0")
    pub default: Option<&'static str>,
    /// Parent table this column references by id
    pub references: Option<&'static str>,
}

impl ColumnDef {
    const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            is_primary_key: false,
            unique: false,
            default: None,
            references: None,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, "TEXT")
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, "INTEGER")
    }

    pub const fn real(name: &'static str) -> Self {
        Self::new(name, "REAL")
    }

    /// The `id` primary key every table carries
    pub const fn id() -> Self {
        Self {
            is_primary_key: true,
            ..Self::text("id")
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn unique(self) -> Self {
        Self {
            unique: true,
            ..self
        }
    }

    pub const fn default(self, expr: &'static str) -> Self {
        Self {
            default: Some(expr),
            ..self
        }
    }

    pub const fn references(self, table: &'static str) -> Self {
        Self {
            references: Some(table),
            ..self
        }
    }

    /// Generate the column definition SQL
    pub fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);

        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY");
        }

        if !self.nullable && !self.is_primary_key {
            sql.push_str(" NOT NULL");
        }

        if self.unique {
            sql.push_str(" UNIQUE");
        }

        if let Some(default) = self.default {
            sql.push_str(&format!(" DEFAULT {}", default));
        }

        if let Some(table) = self.references {
            sql.push_str(&format!(" REFERENCES {}(id)", table));
        }

        sql
    }
}

/// Metadata about a database entity (table).
pub trait DatabaseEntity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + Sized {
    /// The SQL table name (e.g., "maps")
    const TABLE_NAME: &'static str;

    /// Human-readable entity name used in error messages (e.g., "Map")
    const ENTITY_NAME: &'static str;

    /// Every column of the table, primary key first
    const COLUMNS: &'static [ColumnDef];

    /// Table-level CHECK expressions
    const CHECKS: &'static [&'static str] = &[];

    fn column_names() -> Vec<&'static str> {
        Self::COLUMNS.iter().map(|c| c.name).collect()
    }

    /// Build a SELECT query for all columns
    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {}",
            Self::column_names().join(", "),
            Self::TABLE_NAME
        )
    }

    /// Generate CREATE TABLE IF NOT EXISTS SQL
    fn create_table_sql() -> String {
        let mut defs: Vec<String> = Self::COLUMNS.iter().map(|c| c.to_sql()).collect();
        defs.extend(Self::CHECKS.iter().map(|check| format!("CHECK ({})", check)));

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
            Self::TABLE_NAME,
            defs.join(",\n  ")
        )
    }
}

/// Represents a SQL value that can be bound to a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl SqlValue {
    /// Bind this value to a sqlx query
    pub fn bind_to_query<'q>(
        self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        match self {
            SqlValue::String(s) => query.bind(s),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Bool(b) => query.bind(if b { 1i32 } else { 0i32 }),
            SqlValue::Null => query.bind(None::<String>),
        }
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::String(s)
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::String(s.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(i: i32) -> Self {
        SqlValue::Int(i64::from(i))
    }
}

impl From<f64> for SqlValue {
    fn from(f: f64) -> Self {
        SqlValue::Float(f)
    }
}

impl From<bool> for SqlValue {
    fn from(b: bool) -> Self {
        SqlValue::Bool(b)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

/// Column/value pairs for an INSERT or the SET clause of an UPDATE
#[derive(Debug, Default)]
pub struct Changes(Vec<(&'static str, SqlValue)>);

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always write `column`
    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.0.push((column, value.into()));
        self
    }

    /// Write `column` only when a value was supplied
    pub fn set_some<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(|(column, _)| *column).collect()
    }
}

/// CRUD access to one entity table.
///
/// Entity-specific create/update inputs live in `impl Repository<XRecord>`
/// blocks next to each record type.
pub struct Repository<E> {
    pool: SqlitePool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<E> Repository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl<E: DatabaseEntity> Repository<E> {
    /// Every row of the table in insertion order
    pub async fn list_all(&self) -> DbResult<Vec<E>> {
        let sql = format!("{} ORDER BY rowid", E::select_sql());
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Rows whose `column` equals `value`, in insertion order
    pub async fn list_by(&self, column: &'static str, value: &str) -> DbResult<Vec<E>> {
        let sql = format!("{} WHERE {} = ? ORDER BY rowid", E::select_sql(), column);
        let rows = sqlx::query_as::<_, E>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<E>> {
        let sql = format!("{} WHERE id = ?", E::select_sql());
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch a row that must exist
    pub async fn require(&self, id: &str) -> DbResult<E> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(E::ENTITY_NAME, id))
    }

    /// Insert a row under `id` and return it as stored
    pub(crate) async fn insert(&self, id: &str, values: Changes) -> DbResult<E> {
        let values = Changes::new().set("id", id).0.into_iter().chain(values.0);
        let (columns, values): (Vec<_>, Vec<_>) = values.unzip();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE_NAME,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for value in values {
            query = value.bind_to_query(query);
        }
        query.execute(&self.pool).await?;

        self.require(id).await
    }

    /// Apply only the supplied columns and return the updated row.
    ///
    /// With no changes the current row is returned unchanged (or `NotFound`).
    pub(crate) async fn update_columns(&self, id: &str, changes: Changes) -> DbResult<E> {
        if changes.is_empty() {
            return self.require(id).await;
        }

        let set_clauses: Vec<String> = changes
            .columns()
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            E::TABLE_NAME,
            set_clauses.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for (_, value) in changes.0 {
            query = value.bind_to_query(query);
        }
        let result = query.bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(E::ENTITY_NAME, id));
        }

        self.require(id).await
    }

    /// Delete a row and return its state from before the delete.
    ///
    /// Children still referencing the row make this a `ConstraintViolation`.
    pub async fn delete(&self, id: &str) -> DbResult<E> {
        let mut tx = self.pool.begin().await?;

        let select = format!("{} WHERE id = ?", E::select_sql());
        let existing = sqlx::query_as::<_, E>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(E::ENTITY_NAME, id))?;

        let delete = format!("DELETE FROM {} WHERE id = ?", E::TABLE_NAME);
        sqlx::query(&delete).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_sql() {
        assert_eq!(ColumnDef::id().to_sql(), "id TEXT PRIMARY KEY");
        assert_eq!(ColumnDef::real("latitude").to_sql(), "latitude REAL NOT NULL");
        assert_eq!(ColumnDef::text("details").nullable().to_sql(), "details TEXT");
        assert_eq!(ColumnDef::text("email").unique().to_sql(), "email TEXT NOT NULL UNIQUE");
        assert_eq!(
            ColumnDef::integer("is_default").default("0").to_sql(),
            "is_default INTEGER NOT NULL DEFAULT 0"
        );
        assert_eq!(
            ColumnDef::text("map_id").references("maps").to_sql(),
            "map_id TEXT NOT NULL REFERENCES maps(id)"
        );
    }

    #[test]
    fn test_changes_skip_absent_values() {
        let changes = Changes::new()
            .set_some("name", Some("Harbour"))
            .set_some::<f64>("latitude", None)
            .set("type", "poi");
        assert_eq!(changes.columns(), vec!["name", "type"]);
        assert!(Changes::new().set_some::<i32>("duration", None).is_empty());
    }

    #[test]
    fn test_optional_values_become_null() {
        assert_eq!(SqlValue::from(None::<String>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3)), SqlValue::Int(3));
    }
}
