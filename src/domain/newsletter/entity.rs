use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::Email;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub i64);

impl SubscriptionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "subscription id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SubscriptionId> for i64 {
    fn from(value: SubscriptionId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub email: Email,
    pub name: Option<String>,
    pub active: bool,
    pub unsubscribe_token: String,
    pub subscribed_at: DateTime<Utc>,
    pub unsubscribed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub email: Email,
    pub name: Option<String>,
    pub unsubscribe_token: String,
    pub subscribed_at: DateTime<Utc>,
}
