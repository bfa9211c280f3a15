//! Configuration model loaded from external sources.

use secrecy::SecretString;
use serde::Deserialize;

fn default_cors_origin() -> String {
    "http://localhost:4200".to_string()
}

fn default_max_page_size() -> usize {
    100
}

fn default_notify_attempts() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Origin allowed by CORS, the web frontend.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Upper bound applied to the `linesPerPage` query parameter.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    /// SMTP relay used to deliver new passwords. Without it every delivery
    /// fails and `password_reset.on_notification_failure` decides the outcome.
    #[serde(default)]
    pub mailer: Option<MailerConfig>,
    #[serde(default)]
    pub password_reset: PasswordResetConfig,
}

#[derive(Debug, Deserialize)]
pub struct MailerConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
}

/// What the password reset does when the new password could not be mailed
/// after the hash was already stored.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFailurePolicy {
    /// Log the failure and report success; the password stays rotated.
    #[default]
    BestEffort,
    /// Report the failure; the password stays rotated.
    Propagate,
    /// Restore the previous hash, then report the failure.
    Rollback,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct PasswordResetConfig {
    #[serde(default)]
    pub on_notification_failure: NotificationFailurePolicy,
    /// Delivery attempts before the failure policy applies. Zero counts as one.
    #[serde(default = "default_notify_attempts")]
    pub notify_attempts: u32,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            on_notification_failure: NotificationFailurePolicy::default(),
            notify_attempts: default_notify_attempts(),
        }
    }
}

/// Settings the request handlers need at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiSettings {
    pub max_page_size: usize,
    pub password_reset: PasswordResetConfig,
}

impl From<&ServerConfig> for ApiSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_page_size: config.max_page_size,
            password_reset: config.password_reset,
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
            password_reset: PasswordResetConfig::default(),
        }
    }
}
