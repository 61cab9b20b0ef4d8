use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::newsletter::{
    NewSubscription, Subscription, SubscriptionId, SubscriptionRepository,
};
use crate::domain::user::Email;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const COLUMNS: &str = "id, email, name, active, unsubscribe_token, subscribed_at, unsubscribed_at";

#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRow {
    id: i64,
    email: String,
    name: Option<String>,
    active: bool,
    unsubscribe_token: String,
    subscribed_at: DateTime<Utc>,
    unsubscribed_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            id: SubscriptionId::new(row.id)?,
            email: Email::new(row.email)?,
            name: row.name,
            active: row.active,
            unsubscribe_token: row.unsubscribe_token,
            subscribed_at: row.subscribed_at,
            unsubscribed_at: row.unsubscribed_at,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn insert(&self, subscription: NewSubscription) -> DomainResult<Subscription> {
        let sql = format!(
            "INSERT INTO newsletter_subscriptions (email, name, active, unsubscribe_token, subscribed_at)
             VALUES ($1, $2, TRUE, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(subscription.email.as_str())
            .bind(subscription.name)
            .bind(subscription.unsubscribe_token)
            .bind(subscription.subscribed_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Subscription::try_from(row)
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Subscription>> {
        let sql = format!("SELECT {COLUMNS} FROM newsletter_subscriptions WHERE email = $1");
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Subscription::try_from).transpose()
    }

    async fn reactivate(
        &self,
        id: SubscriptionId,
        name: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<Subscription> {
        let sql = format!(
            "UPDATE newsletter_subscriptions
             SET active = TRUE, name = $1, subscribed_at = $2, unsubscribed_at = NULL
             WHERE id = $3
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(name)
            .bind(at)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("subscription not found".into()))?;

        Subscription::try_from(row)
    }

    async fn deactivate_by_token(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Subscription>> {
        let sql = format!(
            "UPDATE newsletter_subscriptions
             SET active = FALSE, unsubscribed_at = COALESCE(unsubscribed_at, $1)
             WHERE unsubscribe_token = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .bind(at)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Subscription::try_from).transpose()
    }

    async fn list(&self, active_only: bool) -> DomainResult<Vec<Subscription>> {
        let filter = if active_only { " WHERE active = TRUE" } else { "" };
        let sql = format!(
            "SELECT {COLUMNS} FROM newsletter_subscriptions{filter} ORDER BY subscribed_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, SubscriptionRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Subscription::try_from).collect()
    }
}
