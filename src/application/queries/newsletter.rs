use std::sync::Arc;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, SubscriptionDto},
        error::ApplicationResult,
    },
    domain::newsletter::SubscriptionRepository,
};

pub struct NewsletterQueryService {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl NewsletterQueryService {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn list_subscribers(
        &self,
        actor: &AuthenticatedUser,
        active_only: bool,
    ) -> ApplicationResult<Vec<SubscriptionDto>> {
        ensure_capability(actor, "newsletter", "manage")?;
        let subscriptions = self.subscriptions.list(active_only).await?;
        Ok(subscriptions.into_iter().map(Into::into).collect())
    }
}
