use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://tasklane.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, read from the environment once at startup.
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    /// Loads the configuration. `JWT_SECRET` has no default: a server
    /// without a signing secret must not come up, so its absence panics
    /// here instead of surfacing later.
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let server_port = match env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().expect("SERVER_PORT must be a number"),
            Err(_) => DEFAULT_PORT,
        };

        Self {
            database_url,
            jwt_secret,
            server_host,
            server_port,
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
