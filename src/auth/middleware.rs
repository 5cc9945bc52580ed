use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::Tokens;
use crate::error::AppError;

/// Paths reachable without a session token: the liveness probe and the two
/// endpoints that hand tokens out in the first place.
const OPEN_PATHS: [&str; 3] = ["/health", "/api/auth/login", "/api/auth/register"];

/// Gate in front of the task routes.
///
/// Every request entering the wrapped scope must carry a header of exactly
/// the `Authorization: Bearer <token>` shape; anything else is turned away
/// with a 401 before a handler runs. Verified claims go into the request
/// extensions for [`crate::auth::AuthenticatedUser`] to pick up. The gate
/// itself never touches task state.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGate<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGate { inner: service }))
    }
}

pub struct AuthGate<S> {
    inner: S,
}

/// Pulls the token out of `Authorization: Bearer <token>`. Any other header
/// shape counts the same as no credential at all.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

impl<S, B> Service<ServiceRequest> for AuthGate<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if OPEN_PATHS.iter().any(|open| req.path().starts_with(open)) {
            return Box::pin(self.inner.call(req));
        }

        let token = match bearer_token(&req) {
            Some(token) => token,
            None => {
                let denied =
                    AppError::Unauthorized("Missing or malformed authorization header".into());
                return Box::pin(async move { Err(denied.into()) });
            }
        };

        let verified = req
            .app_data::<web::Data<Tokens>>()
            .ok_or_else(|| AppError::InternalServerError("Token service not configured".into()))
            .and_then(|tokens| tokens.verify(&token));

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                Box::pin(self.inner.call(req))
            }
            Err(denied) => Box::pin(async move { Err(denied.into()) }),
        }
    }
}
