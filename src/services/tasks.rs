use std::sync::Arc;

use validator::Validate;

use crate::auth::Identity;
use crate::error::{AppError, ErrorKind};
use crate::models::{Task, TaskFilter, TaskInput, TaskStatus};
use crate::pagination::{Cursor, Page, PageRequest};
use crate::store::TaskStore;

/// Parses a wire task id. Anything but a positive integer is invalid input.
pub fn parse_task_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid_input("invalid task id"))
}

/// Task CRUD scoped to the caller.
///
/// Every operation takes the verified [`Identity`]; a task owned by anyone
/// else is reported as `NotFound` so ids of foreign tasks are not confirmed.
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, owner: &Identity, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.store.insert(&owner.user_id, &input).await?;
        log::info!("task {} created by user {}", task.id, owner.user_id);
        Ok(task)
    }

    pub async fn get(&self, owner: &Identity, id: i64) -> Result<Task, AppError> {
        let task = self.store.find_by_id(id).await?;
        if !task.is_owned_by(&owner.user_id) {
            return Err(AppError::not_found("task not found"));
        }
        Ok(task)
    }

    /// One page of `owner_id`'s tasks, oldest first.
    ///
    /// The total is counted concurrently with the page fetch and outside any
    /// transaction, so under concurrent writes it may disagree slightly with
    /// the pages a client walks through.
    pub async fn list(
        &self,
        owner_id: &str,
        status: Option<TaskStatus>,
        page: PageRequest,
    ) -> Result<Page<Task>, AppError> {
        if owner_id.trim().is_empty() {
            return Err(AppError::invalid_input("owner id is required"));
        }

        let filter = TaskFilter {
            user_id: owner_id.to_string(),
            status,
        };
        let after = page.after().map(Cursor::position);

        let (total_count, rows) = futures::try_join!(
            self.store.count(&filter),
            self.store.find_page(&filter, after, page.fetch_limit()),
        )
        .map_err(|err| err.into_internal("failed to list tasks"))?;

        Ok(Page::from_lookahead(rows, &page, total_count, |task| task.id))
    }

    pub async fn update(
        &self,
        owner: &Identity,
        id: i64,
        input: TaskInput,
    ) -> Result<Task, AppError> {
        input.validate()?;
        let task = self.store.update(&owner.user_id, id, &input).await?;
        log::info!("task {} updated by user {}", task.id, owner.user_id);
        Ok(task)
    }

    pub async fn delete(&self, owner: &Identity, id: i64) -> Result<(), AppError> {
        match self.store.delete(&owner.user_id, id).await {
            Ok(()) => {
                log::info!("task {} deleted by user {}", id, owner.user_id);
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(AppError::not_found("task not found"))
            }
            Err(err) => Err(err),
        }
    }
}
