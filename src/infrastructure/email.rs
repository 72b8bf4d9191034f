//! Outbound mail for the contact pipeline.
//!
//! [`SmtpMailer`] delivers over SMTP via lettre; everything above it talks to the
//! [`Mailer`] trait so tests can swap in a mock.

pub mod templates;

use std::time::Duration;

use async_trait::async_trait;
use derive_more::Display;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use crate::settings::SmtpConfig;

#[derive(Debug, Display)]
pub enum EmailError {
    #[display("Invalid email address: {_0}")]
    InvalidAddress(String),

    #[display("Failed to build message: {_0}")]
    Build(String),

    #[display("SMTP error: {_0}")]
    Transport(String),
}

impl std::error::Error for EmailError {}

impl From<SmtpError> for EmailError {
    fn from(err: SmtpError) -> Self {
        EmailError::Transport(err.to_string())
    }
}

impl From<lettre::error::Error> for EmailError {
    fn from(err: lettre::error::Error) -> Self {
        EmailError::Build(err.to_string())
    }
}

/// A rendered email, ready to hand to a [`Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub from_name: Option<String>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the email and returns the `Message-ID` it went out with.
    async fn send(&self, email: OutgoingEmail) -> Result<String, EmailError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Address,
    from_name: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, EmailError> {
        let from_address: Address = config
            .from_address
            .parse()
            .map_err(|_| EmailError::InvalidAddress(config.from_address.clone()))?;

        // 465 is implicit TLS, anything else negotiates STARTTLS
        let relay = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };
        let mut builder = relay
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_address,
            from_name: config.from_name.clone(),
        })
    }

    fn new_message_id(&self) -> String {
        format!("<{}@{}>", Uuid::new_v4(), self.from_address.domain())
    }

    fn build_message(&self, email: &OutgoingEmail, message_id: &str) -> Result<Message, EmailError> {
        let to_address: Address = email
            .to
            .parse()
            .map_err(|_| EmailError::InvalidAddress(email.to.clone()))?;

        let from_name = email.from_name.clone().unwrap_or_else(|| self.from_name.clone());

        let message = Message::builder()
            .from(Mailbox::new(Some(from_name), self.from_address.clone()))
            .to(Mailbox::new(email.to_name.clone(), to_address))
            .subject(email.subject.clone())
            .message_id(Some(message_id.to_string()))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )?;

        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<String, EmailError> {
        let message_id = self.new_message_id();
        let message = self.build_message(&email, &message_id)?;

        self.transport.send(message).await?;

        tracing::info!(to = %email.to, subject = %email.subject, message_id = %message_id, "Email sent");
        Ok(message_id)
    }
}
