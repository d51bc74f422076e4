use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Session payload describing the signed-in administrator.
///
/// Serialized into the identity cookie on login and deserialized back on
/// every request by the [`FromRequest`] impl; handlers that take this type
/// as an argument are reachable only with a valid session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            email: value.email.clone(),
            name: value.name.clone(),
        }
    }
}

impl TryFrom<&Identity> for AuthenticatedUser {
    type Error = Error;

    fn try_from(identity: &Identity) -> Result<Self, Self::Error> {
        let payload = identity
            .id()
            .map_err(|_| ErrorUnauthorized("session expired"))?;
        serde_json::from_str(&payload).map_err(|_| ErrorUnauthorized("invalid session"))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = match Identity::from_request(req, payload).into_inner() {
            Ok(identity) => AuthenticatedUser::try_from(&identity),
            Err(err) => Err(err),
        };
        ready(result)
    }
}
