use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::BackendClaims;
use crate::domain::session::Caller;
use crate::error::AppError;

/// Authenticated caller, built from the claims `JwtExtract` stored on the request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
}

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller::new(self.id.clone(), self.name.clone())
    }
}

impl From<&BackendClaims> for CurrentUser {
    fn from(claims: &BackendClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            name: claims.display_name().to_string(),
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<BackendClaims>()
            .map(CurrentUser::from)
            .ok_or_else(AppError::unauthorized_missing_bearer);
        ready(user)
    }
}
