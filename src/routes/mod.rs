pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Wires the `/auth` and `/tasks` scopes under whatever prefix the caller
/// mounts this in (`/api` in the binary).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::move_task)
            .service(tasks::delete_task),
    );
}
