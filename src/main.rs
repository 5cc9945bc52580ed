use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};

use tasklane::auth::{AuthMiddleware, Tokens};
use tasklane::config::Config;
use tasklane::db;
use tasklane::routes::{self, health};
use tasklane::store::{TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    // Panics when JWT_SECRET is absent; the server must not come up
    // without a signing secret.
    let config = Config::from_env();

    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let tokens = Tokens::new(&config.jwt_secret);
    let users = UserStore::new(pool.clone());
    let tasks = TaskStore::new(pool);

    log::info!("Starting Tasklane server at {}", config.server_url());

    let host = config.server_host.clone();
    let port = config.server_port;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(users.clone()))
            .app_data(web::Data::new(tasks.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
