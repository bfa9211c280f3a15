use actix_web::{HttpResponse, Responder, post, web};

use crate::credentials::Argon2CredentialHasher;
use crate::domain::types::ClientEmail;
use crate::forms::auth::ForgotPasswordForm;
use crate::mailer::CredentialNotifier;
use crate::models::config::ApiSettings;
use crate::repository::DieselRepository;
use crate::routes::{error_response, internal_error};
use crate::services::auth;

#[post("/auth/forgot")]
pub async fn forgot_password(
    form: web::Json<ForgotPasswordForm>,
    repo: web::Data<DieselRepository>,
    hasher: web::Data<Argon2CredentialHasher>,
    notifier: web::Data<dyn CredentialNotifier>,
    settings: web::Data<ApiSettings>,
) -> impl Responder {
    let email = match ClientEmail::try_from(form.into_inner()) {
        Ok(email) => email,
        Err(e) => return error_response(&e.into()),
    };
    let config = settings.password_reset;

    // Hashing and SMTP both block.
    let result = web::block(move || {
        auth::send_new_password(
            repo.get_ref(),
            hasher.get_ref(),
            notifier.get_ref(),
            &config,
            &email,
        )
    })
    .await;

    match result {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            log::error!("Password reset task failed: {e}");
            internal_error()
        }
    }
}
