//! Password reset: a new random password replaces the stored hash and is
//! mailed to the client.

use crate::credentials::{CredentialHasher, TemporaryPassword, generate_password};
use crate::domain::client::Client;
use crate::domain::types::ClientEmail;
use crate::mailer::{CredentialNotifier, NotifierError};
use crate::models::config::{NotificationFailurePolicy, PasswordResetConfig};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

fn notify<N>(
    notifier: &N,
    client: &Client,
    password: &TemporaryPassword,
    attempts: u32,
) -> Result<(), NotifierError>
where
    N: CredentialNotifier + ?Sized,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match notifier.send_new_password(&client.email, client.name.as_str(), password) {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                log::warn!(
                    "Attempt {attempt}/{attempts} to mail new password to client {} failed: {e}",
                    client.id
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Generates a new password for the client registered under `email`, stores
/// its hash and mails the plaintext.
///
/// A failed delivery is handled according to `config.on_notification_failure`.
pub fn send_new_password<R, H, N>(
    repo: &R,
    hasher: &H,
    notifier: &N,
    config: &PasswordResetConfig,
    email: &ClientEmail,
) -> ServiceResult<()>
where
    R: ClientReader + ClientWriter + ?Sized,
    H: CredentialHasher + ?Sized,
    N: CredentialNotifier + ?Sized,
{
    let client = repo
        .get_client_by_email(email)?
        .ok_or_else(|| ServiceError::not_found("Email não encontrado"))?;

    let password = generate_password();

    let hash = hasher.hash(password.expose()).map_err(|e| {
        log::error!("Failed to hash new password for client {}: {e}", client.id);
        ServiceError::Internal(e.to_string())
    })?;

    repo.update_client_password(client.id, Some(&hash))
        .map_err(|e| {
            log::error!("Failed to store new password for client {}: {e}", client.id);
            ServiceError::from(e)
        })?;

    let Err(err) = notify(notifier, &client, &password, config.notify_attempts) else {
        log::info!("New password issued for client {}", client.id);
        return Ok(());
    };

    match config.on_notification_failure {
        NotificationFailurePolicy::BestEffort => {
            log::error!(
                "New password for client {} stored but not delivered: {err}",
                client.id
            );
            Ok(())
        }
        NotificationFailurePolicy::Propagate => {
            log::error!("Failed to deliver new password to client {}: {err}", client.id);
            Err(ServiceError::Notification(err.to_string()))
        }
        NotificationFailurePolicy::Rollback => {
            log::error!(
                "Failed to deliver new password to client {}, restoring previous one: {err}",
                client.id
            );
            let restored = repo
                .replace_client_password(client.id, &hash, client.password_hash.as_deref())
                .map_err(|e| {
                    log::error!("Failed to restore password of client {}: {e}", client.id);
                    ServiceError::from(e)
                })?;
            if !restored {
                log::warn!(
                    "Password of client {} changed again before the restore, keeping it",
                    client.id
                );
            }
            Err(ServiceError::Notification(err.to_string()))
        }
    }
}
