use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, Task, TaskFilter, TaskInput, User, UserChanges};

/// Process-local task storage, keyed and ordered by id.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<BTreeMap<i64, Task>>,
    last_id: AtomicI64,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn task_not_found() -> AppError {
    AppError::not_found("task not found")
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, user_id: &str, input: &TaskInput) -> Result<Task, AppError> {
        // Ids are taken under the write guard so no reader sees a higher id
        // before a lower one lands.
        let mut tasks = self.tasks.write().await;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let task = Task::new(id, user_id, input.clone(), Utc::now());
        tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<Task, AppError> {
        self.tasks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(task_not_found)
    }

    async fn find_page(
        &self,
        filter: &TaskFilter,
        after: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Task>, AppError> {
        let lower = after.map_or(Unbounded, Excluded);
        let tasks = self.tasks.read().await;
        Ok(tasks
            .range((lower, Unbounded))
            .map(|(_, task)| task)
            .filter(|task| filter.matches(task))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &TaskFilter) -> Result<u64, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().filter(|task| filter.matches(task)).count() as u64)
    }

    async fn update(&self, user_id: &str, id: i64, input: &TaskInput) -> Result<Task, AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&id) {
            Some(task) if task.is_owned_by(user_id) => {
                task.apply(input.clone(), Utc::now());
                Ok(task.clone())
            }
            _ => Err(task_not_found()),
        }
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        if !tasks.get(&id).is_some_and(|task| task.is_owned_by(user_id)) {
            return Err(task_not_found());
        }
        tasks.remove(&id);
        Ok(())
    }
}

/// Process-local user storage with a unique email index.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<BTreeMap<i64, User>>,
    last_id: AtomicI64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_not_found() -> AppError {
    AppError::not_found("user not found")
}

fn email_taken() -> AppError {
    AppError::already_exists("email already registered")
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(email_taken());
        }

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let created = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<User, AppError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if let Some(email) = &changes.email {
            if users
                .values()
                .any(|existing| existing.id != id && &existing.email == email)
            {
                return Err(email_taken());
            }
        }

        let user = users.get_mut(&id).ok_or_else(user_not_found)?;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(user_not_found)
    }
}
