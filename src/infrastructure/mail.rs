use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::mailer::{Mailer, OutgoingEmail},
};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

/// Delivers mail through an SMTP relay using STARTTLS.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> ApplicationResult<Self> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|err| ApplicationError::infrastructure(format!("invalid sender: {err}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .port(settings.port);
        if let (Some(user), Some(pass)) = (settings.username, settings.password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: OutgoingEmail) -> ApplicationResult<Message> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|err| ApplicationError::validation(format!("invalid recipient: {err}")))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()> {
        let message = self.build_message(email)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|err| ApplicationError::infrastructure(format!("smtp delivery failed: {err}")))
    }
}

/// Used when no SMTP relay is configured: mail is written to the log
/// instead of being sent.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> ApplicationResult<()> {
        info!(to = %email.to, subject = %email.subject, "mail delivery disabled; message logged");
        Ok(())
    }
}
