use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Result type returned by the login form helpers.
pub type LoginFormResult<T> = Result<T, LoginFormError>;

/// Errors that can occur while processing the login form.
#[derive(Debug, Error)]
pub enum LoginFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Credentials submitted by the login form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Email entered by the user; compared lowercased.
    #[validate(email)]
    pub email: String,
    /// Plaintext password, verified against the stored hash.
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Validates the payload and normalizes the email for lookup.
    pub fn into_credentials(self) -> LoginFormResult<(String, String)> {
        self.validate()?;
        Ok((self.email.trim().to_lowercase(), self.password))
    }
}
