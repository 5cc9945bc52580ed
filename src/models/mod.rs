pub mod task;
pub mod user;

pub use task::{MoveDirection, MoveRequest, Task, TaskInput, TaskUpdate};
pub use user::User;
