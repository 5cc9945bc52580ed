//! Task storage and the list-ordering algorithm.
//!
//! Tasks are keyed by (owner, task id): every statement here filters by
//! `user_id`, so a task id from another owner behaves exactly like a
//! missing one. Each owner's `position` values are kept dense (the
//! contiguous range `0..count`) by running every order-mutating operation
//! (create, delete, move) inside a transaction. SQLite admits one writer at
//! a time, so concurrent mutations on the same owner serialize instead of
//! interleaving mid-renumber.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{MoveDirection, Task, TaskInput, TaskUpdate};

const TASK_COLUMNS: &str = "id, title, completed, position, created_at, updated_at, user_id";

#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All of `owner`'s tasks, front of the list first.
    pub async fn list(&self, owner: &str) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ? ORDER BY position ASC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Inserts a task at the back of `owner`'s list. The slot is read and
    /// claimed in one transaction so two concurrent creates cannot both
    /// take it.
    pub async fn create(&self, owner: &str, input: TaskInput) -> Result<Task, AppError> {
        let mut tx = self.pool.begin().await?;

        let (next_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE user_id = ?")
                .bind(owner)
                .fetch_one(&mut *tx)
                .await?;

        let task = Task::new(input, owner, next_position);
        sqlx::query(
            "INSERT INTO tasks (id, title, completed, position, created_at, updated_at, user_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(task.completed)
        .bind(task.position)
        .bind(task.created_at)
        .bind(task.updated_at)
        .bind(&task.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(task)
    }

    /// Applies a partial update. A `position` value is written verbatim;
    /// callers coordinating a two-call swap own the density invariant on
    /// this path (see `move_adjacent` for the safe variant).
    pub async fn update(
        &self,
        owner: &str,
        task_id: &str,
        changes: TaskUpdate,
    ) -> Result<Task, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?"
        ))
        .bind(task_id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        if let Some(position) = changes.position {
            task.position = position;
        }
        task.updated_at = Utc::now();

        sqlx::query(
            "UPDATE tasks SET title = ?, completed = ?, position = ?, updated_at = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&task.title)
        .bind(task.completed)
        .bind(task.position)
        .bind(task.updated_at)
        .bind(&task.id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(task)
    }

    /// Removes a task and compacts the survivors back into `0..n`.
    ///
    /// The compaction re-assigns every surviving task its index in
    /// position-sorted order, which closes the gap left by the deleted row
    /// and also repairs any duplicates a half-applied client-side swap left
    /// behind. O(n) row updates per delete; per-user lists are small.
    pub async fn delete(&self, owner: &str, task_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }

        let survivors: Vec<(String, i64)> =
            sqlx::query_as("SELECT id, position FROM tasks WHERE user_id = ? ORDER BY position ASC")
                .bind(owner)
                .fetch_all(&mut *tx)
                .await?;

        for (index, (id, position)) in survivors.iter().enumerate() {
            let index = index as i64;
            if *position != index {
                sqlx::query("UPDATE tasks SET position = ? WHERE id = ?")
                    .bind(index)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Swaps a task with its adjacent neighbor in one transaction, so no
    /// committed state ever holds two tasks in the same slot.
    pub async fn move_adjacent(
        &self,
        owner: &str,
        task_id: &str,
        direction: MoveDirection,
    ) -> Result<Task, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND user_id = ?"
        ))
        .bind(task_id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

        let target = match direction {
            MoveDirection::Up => task.position - 1,
            MoveDirection::Down => task.position + 1,
        };

        let neighbor: Option<(String,)> = if target < 0 {
            None
        } else {
            sqlx::query_as("SELECT id FROM tasks WHERE user_id = ? AND position = ?")
                .bind(owner)
                .bind(target)
                .fetch_optional(&mut *tx)
                .await?
        };
        let (neighbor_id,) =
            neighbor.ok_or_else(|| AppError::BadRequest("Cannot move task any further".into()))?;

        let now = Utc::now();
        sqlx::query("UPDATE tasks SET position = ?, updated_at = ? WHERE id = ?")
            .bind(task.position)
            .bind(now)
            .bind(&neighbor_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE tasks SET position = ?, updated_at = ? WHERE id = ?")
            .bind(target)
            .bind(now)
            .bind(&task.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        task.position = target;
        task.updated_at = now;
        Ok(task)
    }
}
