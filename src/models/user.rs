use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered user. Internal only; never serialized into a response, so
/// the password hash cannot leak through an endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
