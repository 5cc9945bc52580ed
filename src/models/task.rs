use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A task entity as stored and as returned by the API.
///
/// `position` is the task's slot in its owner's list. For every owner the
/// positions of their tasks form the contiguous range `0..count`, kept
/// dense by the store across creates, deletes, and moves. Positions are
/// meaningless across owners. The field serializes as `order`, the name the
/// API exposes; the column is `position` because `ORDER` is reserved in SQL.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: String,
    /// The title of the task.
    pub title: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Zero-based slot in the owner's list.
    #[serde(rename = "order")]
    pub position: i64,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
    /// Identifier of the user who owns the task. Immutable once set.
    pub user_id: String,
}

/// Input for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task. At most 200 characters and not blank.
    #[validate(length(max = 200), custom = "validate_title")]
    pub title: String,

    /// Initial completion state; defaults to false when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Partial update of a task. Omitted fields are left untouched.
///
/// `order` is written verbatim when present; the store does not re-check
/// list density on this path. Clients swapping two adjacent tasks by
/// issuing two of these updates must reload the list if either call fails.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(max = 200), custom = "validate_title")]
    pub title: Option<String>,

    pub completed: Option<bool>,

    #[serde(rename = "order")]
    #[validate(range(min = 0))]
    pub position: Option<i64>,
}

/// Direction for moving a task one slot within its owner's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Toward the front of the list (smaller position).
    Up,
    /// Toward the back of the list (larger position).
    Down,
}

/// Request body for the move endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

/// Whitespace-only titles carry no content; reject them along with the
/// empty string.
fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("blank_title");
        err.message = Some("title must not be blank".into());
        return Err(err);
    }
    Ok(())
}

impl Task {
    /// Creates a new `Task` from `TaskInput`, the owner's id, and the slot
    /// assigned by the store. Sets `created_at`/`updated_at` to now and the
    /// id to a fresh UUID.
    pub fn new(input: TaskInput, user_id: &str, position: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            completed: input.completed,
            position,
            created_at: now,
            updated_at: now,
            user_id: user_id.to_string(),
        }
    }
}
