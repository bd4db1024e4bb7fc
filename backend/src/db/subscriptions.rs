//! Billing plan subscriptions
//!
//! Not to be confused with GraphQL subscriptions, which live in
//! `graphql::subscriptions` and never touch the database.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::entity::{Changes, ColumnDef, DatabaseEntity, Repository};
use super::error::DbResult;
use super::sqlite_helpers::{datetime_to_str, decode_err, new_id, str_to_datetime};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanSubscriptionRecord {
    pub id: String,
    pub user_id: String,
    pub plan_type: String,
    pub expiration: DateTime<Utc>,
}

impl sqlx::FromRow<'_, SqliteRow> for PlanSubscriptionRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let expiration: String = row.try_get("expiration")?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            plan_type: row.try_get("plan_type")?,
            expiration: str_to_datetime(&expiration).map_err(decode_err)?,
        })
    }
}

impl DatabaseEntity for PlanSubscriptionRecord {
    const TABLE_NAME: &'static str = "subscriptions";
    const ENTITY_NAME: &'static str = "Subscription";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::id(),
        ColumnDef::text("user_id").references("users"),
        ColumnDef::text("plan_type"),
        ColumnDef::text("expiration"),
    ];
}

pub type PlanSubscriptionRepository = Repository<PlanSubscriptionRecord>;

impl Repository<PlanSubscriptionRecord> {
    pub async fn create(
        &self,
        user_id: String,
        plan_type: String,
        expiration: DateTime<Utc>,
    ) -> DbResult<PlanSubscriptionRecord> {
        let values = Changes::new()
            .set("user_id", user_id)
            .set("plan_type", plan_type)
            .set("expiration", datetime_to_str(expiration));
        self.insert(&new_id(), values).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_user, test_db};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_expiration_roundtrip() {
        let db = test_db().await;
        let user = seed_user(&db, "u@example.com").await;
        let expiration = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();

        let plan = db
            .plan_subscriptions()
            .create(user.id.clone(), "premium".into(), expiration)
            .await
            .unwrap();

        let listed = db.plan_subscriptions().list_by("user_id", &user.id).await.unwrap();
        assert_eq!(listed, vec![plan]);
        assert_eq!(listed[0].expiration, expiration);
    }
}
