pub mod task;
pub mod user;

pub use task::{Task, TaskFilter, TaskInput, TaskStatus};
pub use user::{NewUser, UpdateUserRequest, User, UserChanges};
