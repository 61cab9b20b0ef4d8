use crate::domain::errors::DomainResult;
use crate::domain::newsletter::entity::{NewSubscription, Subscription, SubscriptionId};
use crate::domain::user::Email;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn insert(&self, subscription: NewSubscription) -> DomainResult<Subscription>;
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<Subscription>>;
    async fn reactivate(
        &self,
        id: SubscriptionId,
        name: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<Subscription>;
    /// Returns `None` when no subscription carries the token.
    async fn deactivate_by_token(
        &self,
        token: &str,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Subscription>>;
    async fn list(&self, active_only: bool) -> DomainResult<Vec<Subscription>>;
}
