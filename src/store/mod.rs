//! Persistence boundary for tasks and users.
//!
//! Services only see these traits. [`postgres`] is used when a database is
//! configured and [`memory`] otherwise (and in tests).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskFilter, TaskInput, User, UserChanges};

pub use memory::{MemoryTaskStore, MemoryUserStore};
pub use postgres::{PgTaskStore, PgUserStore};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, user_id: &str, input: &TaskInput) -> Result<Task, AppError>;

    /// `NotFound` when no task has this id.
    async fn find_by_id(&self, id: i64) -> Result<Task, AppError>;

    /// Up to `limit` tasks matching `filter` with id greater than `after`,
    /// ordered by ascending id.
    async fn find_page(
        &self,
        filter: &TaskFilter,
        after: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Task>, AppError>;

    async fn count(&self, filter: &TaskFilter) -> Result<u64, AppError>;

    /// Replaces a task owned by `user_id`. `NotFound` when it does not exist
    /// or belongs to someone else.
    async fn update(&self, user_id: &str, id: i64, input: &TaskInput) -> Result<Task, AppError>;

    /// Same ownership rule as [`TaskStore::update`].
    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `AlreadyExists` when the email is taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<User, AppError>;

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
