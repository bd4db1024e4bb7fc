//! SQLite helper utilities for type conversion
//!
//! SQLite has no native timestamp, boolean or JSON column types. This module
//! converts between the Rust types used by the records and the TEXT/INTEGER
//! representations stored in the database.

use anyhow::{Result, anyhow};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// ============================================================================
// Identifier Helpers
// ============================================================================

/// Generate a fresh primary key for a new row
#[inline]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ============================================================================
// Timestamp Helpers (stored as RFC 3339 TEXT)
// ============================================================================

/// Convert a timestamp to the RFC 3339 text stored in SQLite.
///
/// Sub-second digits are only written when present, so the conversion is
/// lossless in both directions.
#[inline]
pub fn datetime_to_str(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse stored RFC 3339 text back into a UTC timestamp
#[inline]
pub fn str_to_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Rows written by SQLite's datetime() function: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
                .map_err(|e| anyhow!("Invalid datetime '{}': {}", s, e))
        })
}

// ============================================================================
// Boolean Helpers (SQLite uses 0/1 integers)
// ============================================================================

/// Convert bool to SQLite integer (0 or 1)
#[inline]
pub fn bool_to_int(b: bool) -> i32 {
    if b { 1 } else { 0 }
}

/// Convert SQLite integer to bool
#[inline]
pub fn int_to_bool(i: i32) -> bool {
    i != 0
}

// ============================================================================
// JSON Helpers (stored as TEXT)
// ============================================================================

/// Serialize a structured value for storage
#[inline]
pub fn json_to_str(value: &JsonValue) -> String {
    // Serializing a `serde_json::Value` cannot fail: every key is a string.
    value.to_string()
}

/// Deserialize stored JSON text
#[inline]
pub fn str_to_json(s: &str) -> Result<JsonValue> {
    serde_json::from_str(s).map_err(|e| anyhow!("JSON parse error: {}", e))
}

/// Map a conversion failure into a row decode error
pub fn decode_err(e: anyhow::Error) -> sqlx::Error {
    sqlx::Error::Decode(e.into())
}
