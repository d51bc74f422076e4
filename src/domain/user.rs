use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Administrator account allowed to manage the catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    /// Lowercased email used as the login identifier.
    pub email: String,
    pub name: String,
    /// Argon2id hash of the password in PHC string format.
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new administrator account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl NewUser {
    /// Build a new account payload; the email is lowercased for lookups.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().to_lowercase(),
            name: name.into(),
            password_hash: password_hash.into(),
        }
    }
}
