use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// Owner identity for the current request.
///
/// `AuthMiddleware` verifies the bearer token and parks the decoded
/// [`Claims`] in request extensions; this extractor reads them back and
/// hands the handler the owner's id. A request that never passed through
/// the middleware has no claims and fails extraction with a 401.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(match claims {
            Some(claims) => Ok(AuthenticatedUser(claims.sub)),
            None => Err(AppError::Unauthorized("No authenticated identity".into()).into()),
        })
    }
}
