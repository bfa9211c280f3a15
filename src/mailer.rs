//! Delivery of new passwords to clients.
//!
//! Uses blocking SMTP via lettre; callers run it off the async executor.

use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::credentials::TemporaryPassword;
use crate::domain::types::ClientEmail;
use crate::models::config::MailerConfig;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("No mailer configured")]
    NotConfigured,
}

/// Sends a newly generated password to its owner.
#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
pub trait CredentialNotifier: Send + Sync {
    fn send_new_password(
        &self,
        recipient: &ClientEmail,
        name: &str,
        password: &TemporaryPassword,
    ) -> Result<(), NotifierError>;
}

fn new_password_body(name: &str, password: &TemporaryPassword) -> String {
    format!(
        "Olá, {name}!\n\n\
         Sua senha de acesso ao OSWorks foi redefinida.\n\
         Nova senha: {}\n\n\
         Recomendamos alterá-la no próximo acesso.\n",
        password.expose()
    )
}

pub struct SmtpNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &MailerConfig) -> Result<Self, NotifierError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = SmtpTransport::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|_| NotifierError::InvalidAddress(config.from_address.clone()))?;

        Ok(Self { mailer, from })
    }
}

impl CredentialNotifier for SmtpNotifier {
    fn send_new_password(
        &self,
        recipient: &ClientEmail,
        name: &str,
        password: &TemporaryPassword,
    ) -> Result<(), NotifierError> {
        let to = recipient
            .as_str()
            .parse::<Mailbox>()
            .map_err(|_| NotifierError::InvalidAddress(recipient.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("OSWorks: nova senha de acesso")
            .header(ContentType::TEXT_PLAIN)
            .body(new_password_body(name, password))?;

        self.mailer.send(&message)?;

        log::info!("New password email sent to {recipient}");
        Ok(())
    }
}

/// Stand-in used when no SMTP relay is configured. Every delivery fails so the
/// configured failure policy decides what happens to the rotated password.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

impl CredentialNotifier for DisabledNotifier {
    fn send_new_password(
        &self,
        recipient: &ClientEmail,
        _name: &str,
        _password: &TemporaryPassword,
    ) -> Result<(), NotifierError> {
        log::warn!("Mailer disabled, new password for {recipient} was not delivered");
        Err(NotifierError::NotConfigured)
    }
}
