use serde::Deserialize;
use validator::Validate;

use crate::domain::types::ClientEmail;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /auth/forgot`.
pub struct ForgotPasswordForm {
    #[validate(email)]
    pub email: String,
}

impl TryFrom<ForgotPasswordForm> for ClientEmail {
    type Error = FormError;

    fn try_from(form: ForgotPasswordForm) -> Result<Self, Self::Error> {
        form.validate()?;
        ClientEmail::new(form.email).map_err(FormError::field("email"))
    }
}
