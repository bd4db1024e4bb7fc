use super::prelude::*;

/// Users and the records that hang off a user
#[derive(Default)]
pub struct UserMutations;

#[Object]
impl UserMutations {
    /// Register a user. The password is stored as a bcrypt hash.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
    ) -> Result<User> {
        let password_hash = ctx
            .password_hasher()
            .hash(password)
            .await
            .map_err(internal_error)?;

        let record = ctx
            .db()
            .users()
            .create(CreateUser {
                name,
                email,
                password_hash,
                role: DEFAULT_ROLE.to_string(),
            })
            .await
            .into_gql()?;

        tracing::info!(user_id = %record.id, "User created");
        Ok(User::from(record))
    }

    /// Update the supplied user fields; a new password is re-hashed
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<User> {
        let password_hash = match password {
            Some(password) => Some(
                ctx.password_hasher()
                    .hash(password)
                    .await
                    .map_err(internal_error)?,
            ),
            None => None,
        };

        let record = ctx
            .db()
            .users()
            .update(
                &id,
                UpdateUser {
                    name,
                    email,
                    password_hash,
                },
            )
            .await
            .into_gql()?;

        tracing::debug!(user_id = %record.id, "User updated");
        Ok(User::from(record))
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<User> {
        let record = ctx.db().users().delete(&id).await.into_gql()?;
        tracing::info!(user_id = %record.id, "User deleted");
        Ok(User::from(record))
    }

    /// Start a billing plan for a user
    async fn create_subscription(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        plan_type: String,
        expiration: DateTime,
    ) -> Result<PlanSubscription> {
        let record = ctx
            .db()
            .plan_subscriptions()
            .create(user_id.0, plan_type, expiration.0)
            .await
            .into_gql()?;

        tracing::info!(subscription_id = %record.id, user_id = %record.user_id, "Subscription created");
        Ok(PlanSubscription::from(record))
    }

    async fn delete_subscription(&self, ctx: &Context<'_>, id: ID) -> Result<PlanSubscription> {
        let record = ctx.db().plan_subscriptions().delete(&id).await.into_gql()?;
        tracing::info!(subscription_id = %record.id, "Subscription deleted");
        Ok(PlanSubscription::from(record))
    }

    /// Bookmark exactly one place or route
    async fn create_favorite(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        place_id: Option<ID>,
        route_id: Option<ID>,
    ) -> Result<Favorite> {
        let target =
            TargetRef::from_ids(place_id.map(|id| id.0), route_id.map(|id| id.0)).into_gql()?;

        let record = ctx
            .db()
            .favorites()
            .create(user_id.0, target)
            .await
            .into_gql()?;

        tracing::info!(favorite_id = %record.id, target = ?record.target, "Favorite created");
        Ok(Favorite::from(record))
    }

    async fn delete_favorite(&self, ctx: &Context<'_>, id: ID) -> Result<Favorite> {
        let record = ctx.db().favorites().delete(&id).await.into_gql()?;
        tracing::info!(favorite_id = %record.id, "Favorite deleted");
        Ok(Favorite::from(record))
    }

    /// Log a navigation action for a user
    async fn create_navigation_history(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        action: String,
        details: Option<String>,
    ) -> Result<NavigationHistory> {
        let record = ctx
            .db()
            .navigation_history()
            .create(user_id.0, action, details)
            .await
            .into_gql()?;

        tracing::debug!(entry_id = %record.id, action = %record.action, "Navigation history recorded");
        Ok(NavigationHistory::from(record))
    }

    async fn delete_navigation_history(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<NavigationHistory> {
        let record = ctx.db().navigation_history().delete(&id).await.into_gql()?;
        tracing::info!(entry_id = %record.id, "Navigation history deleted");
        Ok(NavigationHistory::from(record))
    }

    async fn create_map_style(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        name: String,
        style: Json,
        is_default: bool,
    ) -> Result<MapStyle> {
        let record = ctx
            .db()
            .map_styles()
            .create(CreateMapStyle {
                user_id: user_id.0,
                name,
                style: style.0,
                is_default,
            })
            .await
            .into_gql()?;

        tracing::info!(style_id = %record.id, is_default = record.is_default, "Map style created");
        Ok(MapStyle::from(record))
    }

    async fn delete_map_style(&self, ctx: &Context<'_>, id: ID) -> Result<MapStyle> {
        let record = ctx.db().map_styles().delete(&id).await.into_gql()?;
        tracing::info!(style_id = %record.id, "Map style deleted");
        Ok(MapStyle::from(record))
    }
}
