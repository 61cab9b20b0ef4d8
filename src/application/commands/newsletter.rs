use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::{
    application::{
        capability::ensure_capability,
        dto::{AuthenticatedUser, DigestReportDto, SubscriptionDto},
        error::{ApplicationError, ApplicationResult},
        notifications::NotificationService,
        ports::time::Clock,
    },
    domain::{
        content::{ContentFilter, ContentKind, ContentReadRepository, StatusFilter},
        errors::non_blank,
        newsletter::{NewSubscription, SubscriptionRepository},
        user::Email,
    },
};

const DIGEST_WINDOW_DAYS: i64 = 7;
const DIGEST_MAX_ITEMS: u32 = 50;

pub struct SubscribeCommand {
    pub email: String,
    pub name: Option<String>,
}

pub struct NewsletterCommandService {
    subscriptions: Arc<dyn SubscriptionRepository>,
    content_repo: Arc<dyn ContentReadRepository>,
    notifications: Arc<NotificationService>,
    clock: Arc<dyn Clock>,
}

impl NewsletterCommandService {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        content_repo: Arc<dyn ContentReadRepository>,
        notifications: Arc<NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            subscriptions,
            content_repo,
            notifications,
            clock,
        }
    }

    /// Subscribing an address that unsubscribed earlier reactivates it.
    pub async fn subscribe(&self, command: SubscribeCommand) -> ApplicationResult<SubscriptionDto> {
        let email = Email::new(command.email)?;
        let name = non_blank(command.name);
        let now = self.clock.now();

        let subscription = match self.subscriptions.find_by_email(&email).await? {
            Some(existing) if existing.active => {
                return Err(ApplicationError::conflict("this email is already subscribed"));
            }
            Some(existing) => {
                self.subscriptions
                    .reactivate(existing.id, name.or(existing.name), now)
                    .await?
            }
            None => {
                self.subscriptions
                    .insert(NewSubscription {
                        email,
                        name,
                        unsubscribe_token: Uuid::new_v4().simple().to_string(),
                        subscribed_at: now,
                    })
                    .await?
            }
        };

        self.notifications.welcome(&subscription).await;
        Ok(subscription.into())
    }

    pub async fn unsubscribe(&self, token: &str) -> ApplicationResult<SubscriptionDto> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApplicationError::validation("unsubscribe token is required"));
        }
        self.subscriptions
            .deactivate_by_token(token, self.clock.now())
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("subscription not found"))
    }

    /// E-mails every active subscriber the content published in the last
    /// seven days. Nothing is sent when there is nothing new.
    pub async fn send_digest(&self, actor: &AuthenticatedUser) -> ApplicationResult<DigestReportDto> {
        ensure_capability(actor, "newsletter", "manage")?;
        let since = self.clock.now() - Duration::days(DIGEST_WINDOW_DAYS);
        let filter = ContentFilter {
            status: StatusFilter::Published,
            published_since: Some(since),
            limit: DIGEST_MAX_ITEMS,
            ..ContentFilter::default()
        };

        let articles = self.content_repo.list(ContentKind::Article, &filter).await?;
        let poems = self.content_repo.list(ContentKind::Poem, &filter).await?;
        let recipients = self.subscriptions.list(true).await?;

        let mut report = DigestReportDto {
            articles: articles.len(),
            poems: poems.len(),
            recipients: recipients.len(),
            delivered: 0,
            failed: 0,
        };
        if articles.is_empty() && poems.is_empty() {
            return Ok(report);
        }

        let items: Vec<_> = articles.into_iter().chain(poems).collect();
        let delivery = self.notifications.digest(&items, &recipients).await;
        report.delivered = delivery.delivered;
        report.failed = delivery.failed;
        tracing::info!(
            recipients = report.recipients,
            delivered = report.delivered,
            failed = report.failed,
            "weekly digest sent"
        );
        Ok(report)
    }
}
