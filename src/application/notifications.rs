//! Reader e-mails: welcome, new-content announcements and the weekly digest.
//!
//! Delivery failures are logged and never fail the request that triggered
//! them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    application::ports::mailer::{Mailer, OutgoingEmail},
    domain::{
        content::{ContentItem, ContentKind},
        newsletter::{Subscription, SubscriptionRepository},
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    site_url: String,
}

impl NotificationService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            subscriptions,
            site_url: site_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn unsubscribe_link(&self, subscription: &Subscription) -> String {
        format!(
            "{}/newsletter/unsubscribe?token={}",
            self.site_url, subscription.unsubscribe_token
        )
    }

    fn content_link(&self, item: &ContentItem) -> String {
        format!("{}/{}/{}", self.site_url, item.kind.plural(), item.slug)
    }

    fn greeting(subscription: &Subscription) -> String {
        match &subscription.name {
            Some(name) => format!("Dear {name},"),
            None => "Dear reader,".to_string(),
        }
    }

    pub async fn welcome(&self, subscription: &Subscription) {
        let unsubscribe = self.unsubscribe_link(subscription);
        let greeting = Self::greeting(subscription);
        let email = OutgoingEmail {
            to: subscription.email.to_string(),
            subject: "Welcome to the magazine newsletter".to_string(),
            text: format!(
                "{greeting}\n\nThank you for subscribing. You will hear from us when new \
                 articles and poems are published.\n\nUnsubscribe: {unsubscribe}\n"
            ),
            html: format!(
                "<p>{greeting}</p><p>Thank you for subscribing. You will hear from us when \
                 new articles and poems are published.</p>\
                 <p><a href=\"{unsubscribe}\">Unsubscribe</a></p>"
            ),
        };
        if let Err(err) = self.mailer.send(email).await {
            warn!(error = %err, email = %subscription.email, "failed to send welcome e-mail");
        }
    }

    /// Tells every active subscriber about a newly published item.
    pub async fn announce(&self, item: &ContentItem) -> DeliveryReport {
        let recipients = match self.subscriptions.list(true).await {
            Ok(recipients) => recipients,
            Err(err) => {
                warn!(error = %err, "could not load newsletter recipients");
                return DeliveryReport::default();
            }
        };

        let title = item.text.primary_title().unwrap_or_default();
        let excerpt = item
            .text
            .excerpt
            .as_deref()
            .or(item.text.excerpt_am.as_deref())
            .unwrap_or_default();
        let link = self.content_link(item);
        let label = match item.kind {
            ContentKind::Article => "New article",
            ContentKind::Poem => "New poem",
        };

        let mut report = DeliveryReport::default();
        for subscription in &recipients {
            let unsubscribe = self.unsubscribe_link(subscription);
            let email = OutgoingEmail {
                to: subscription.email.to_string(),
                subject: format!("{label}: {title}"),
                text: format!("{title}\n\n{excerpt}\n\nRead it: {link}\n\nUnsubscribe: {unsubscribe}\n"),
                html: format!(
                    "<h2>{title}</h2><p>{excerpt}</p><p><a href=\"{link}\">Read it</a></p>\
                     <p><a href=\"{unsubscribe}\">Unsubscribe</a></p>"
                ),
            };
            self.deliver(email, &mut report).await;
        }
        info!(
            kind = %item.kind,
            slug = %item.slug,
            delivered = report.delivered,
            failed = report.failed,
            "announced new content"
        );
        report
    }

    /// Sends one digest listing `items` to each recipient.
    pub async fn digest(
        &self,
        items: &[ContentItem],
        recipients: &[Subscription],
    ) -> DeliveryReport {
        let mut text_list = String::new();
        let mut html_list = String::new();
        for item in items {
            let title = item.text.primary_title().unwrap_or_default();
            let link = self.content_link(item);
            text_list.push_str(&format!("- {title} ({link})\n"));
            html_list.push_str(&format!("<li><a href=\"{link}\">{title}</a></li>"));
        }

        let mut report = DeliveryReport::default();
        for subscription in recipients {
            let greeting = Self::greeting(subscription);
            let unsubscribe = self.unsubscribe_link(subscription);
            let email = OutgoingEmail {
                to: subscription.email.to_string(),
                subject: "This week in the magazine".to_string(),
                text: format!(
                    "{greeting}\n\nNew this week:\n{text_list}\nUnsubscribe: {unsubscribe}\n"
                ),
                html: format!(
                    "<p>{greeting}</p><p>New this week:</p><ul>{html_list}</ul>\
                     <p><a href=\"{unsubscribe}\">Unsubscribe</a></p>"
                ),
            };
            self.deliver(email, &mut report).await;
        }
        report
    }

    async fn deliver(&self, email: OutgoingEmail, report: &mut DeliveryReport) {
        let to = email.to.clone();
        match self.mailer.send(email).await {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                report.failed += 1;
                warn!(error = %err, email = %to, "failed to send newsletter e-mail");
            }
        }
    }
}
