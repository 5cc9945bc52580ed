use crate::{
    auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, Tokens},
    error::AppError,
    store::UserStore,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Creates an account and signs the caller in.
///
/// The email must not already be registered; the comparison is exact and
/// case-sensitive, the same as the login lookup. On success the response
/// carries a fresh session token, so no separate login round-trip is
/// needed.
#[post("/register")]
pub async fn register(
    users: web::Data<UserStore>,
    tokens: web::Data<Tokens>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    if users.find_by_email(&payload.email).await?.is_some() {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = users.create(&payload.email, &password_hash).await?;
    let token = tokens.issue(&user.id)?;

    Ok(HttpResponse::Created().json(AuthResponse { token }))
}

/// Exchanges credentials for a session token.
///
/// An unknown address and a wrong password produce the same status and the
/// same body; the endpoint gives away nothing about which emails exist.
#[post("/login")]
pub async fn login(
    users: web::Data<UserStore>,
    tokens: web::Data<Tokens>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid credentials".into()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::BadRequest("Invalid credentials".into()));
    }

    let token = tokens.issue(&user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse { token }))
}
