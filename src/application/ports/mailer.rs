use crate::application::ApplicationResult;
use async_trait::async_trait;

/// A rendered e-mail with plain-text and HTML alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()>;
}
