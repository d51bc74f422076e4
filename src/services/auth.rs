use argon2::password_hash::{PasswordHash, SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::domain::user::User;
use crate::forms::auth::LoginForm;
use crate::repository::UserReader;
use crate::services::{ServiceError, ServiceResult};

/// Verify the submitted credentials against the stored administrator
/// account.
///
/// Unknown emails and wrong passwords are indistinguishable to the caller;
/// both surface `ServiceError::Unauthorized` and the login view stays open.
pub fn sign_in<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let (email, password) = form
        .into_credentials()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let Some(user) = repo.get_user_by_email(&email).map_err(ServiceError::from)? else {
        return Err(ServiceError::Unauthorized);
    };

    let parsed_hash =
        PasswordHash::new(&user.password_hash).map_err(|_| ServiceError::Unauthorized)?;

    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(ServiceError::Unauthorized);
    }

    Ok(user)
}

/// Hash a plaintext password into an Argon2id PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}
