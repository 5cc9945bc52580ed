use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{MoveRequest, TaskInput, TaskUpdate},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Returns the authenticated user's complete task list, front of the list
/// first (ascending `order`). No pagination; the list is the snapshot.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `Task` objects.
/// - `401 Unauthorized`: no valid session token.
#[get("")]
pub async fn list_tasks(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list(&user.0).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task at the back of the caller's list.
///
/// `order` is assigned by the store: one past the current maximum, or 0
/// for a first task. The body takes a required non-blank `title` and an
/// optional initial `completed` flag.
///
/// ## Responses:
/// - `201 Created`: the stored `Task`, including its generated id.
/// - `400 Bad Request`: blank or overlong title.
/// - `401 Unauthorized`: no valid session token.
#[post("")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
    payload: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = store.create(&user.0, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Applies a partial update: any subset of `title`, `completed`, and
/// `order`; omitted fields keep their values. A task belonging to someone
/// else is reported as missing, not forbidden.
///
/// ## Responses:
/// - `200 OK`: the task after the update.
/// - `400 Bad Request`: a provided field failed validation.
/// - `401 Unauthorized`: no valid session token.
/// - `404 Not Found`: no task with this id belongs to the caller.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    payload: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = store
        .update(&user.0, &task_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Moves a task one slot up or down, swapping places with its neighbor in
/// a single store transaction. A client issuing two separate updates could
/// be interrupted between them; this endpoint cannot leave the list
/// half-swapped. Moving the first task up or the last one down is refused.
///
/// ## Responses:
/// - `200 OK`: the task in its new slot.
/// - `400 Bad Request`: the task is already at that end of the list.
/// - `401 Unauthorized`: no valid session token.
/// - `404 Not Found`: no task with this id belongs to the caller.
#[post("/{id}/move")]
pub async fn move_task(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
    payload: web::Json<MoveRequest>,
) -> Result<impl Responder, AppError> {
    let task = store
        .move_adjacent(&user.0, &task_id, payload.direction)
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task. The survivors are renumbered so their `order` values
/// stay contiguous from 0.
///
/// ## Responses:
/// - `200 OK`: a confirmation message.
/// - `401 Unauthorized`: no valid session token.
/// - `404 Not Found`: no task with this id belongs to the caller.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    user: AuthenticatedUser,
    task_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    store.delete(&user.0, &task_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task deleted"
    })))
}
