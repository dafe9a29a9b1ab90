use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{TaskStore, UserStore};
use crate::error::{AppError, ErrorKind};
use crate::models::{NewUser, Task, TaskFilter, TaskInput, User, UserChanges};

const TASK_COLUMNS: &str =
    "id, user_id, title, description, status, due_date, created_at, updated_at";
const USER_COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Opens a pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| AppError::internal("failed to connect to database").with_source(e))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::internal("failed to run migrations").with_source(e))?;

    log::info!("Database connection established");
    Ok(pool)
}

/// Appends the filter's conditions to `sql`, numbering placeholders from
/// `$1`. Returns the next free placeholder index.
fn push_filter(sql: &mut String, filter: &TaskFilter) -> usize {
    sql.push_str(" WHERE user_id = $1");
    let mut param_count = 2;
    if filter.status.is_some() {
        sql.push_str(&format!(" AND status = ${}", param_count));
        param_count += 1;
    }
    param_count
}

#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn insert(&self, user_id: &str, input: &TaskInput) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks (user_id, title, description, status, due_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_by_id(&self, id: i64) -> Result<Task, AppError> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("task not found"))
    }

    async fn find_page(
        &self,
        filter: &TaskFilter,
        after: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Task>, AppError> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tasks");
        let mut param_count = push_filter(&mut sql, filter);
        if after.is_some() {
            sql.push_str(&format!(" AND id > ${}", param_count));
            param_count += 1;
        }
        sql.push_str(&format!(" ORDER BY id ASC LIMIT ${}", param_count));

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(&filter.user_id);
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(after) = after {
            query = query.bind(after);
        }
        let tasks = query.bind(i64::from(limit)).fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn count(&self, filter: &TaskFilter) -> Result<u64, AppError> {
        let mut sql = String::from("SELECT COUNT(*) FROM tasks");
        push_filter(&mut sql, filter);

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(&filter.user_id);
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        let count = query.fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn update(&self, user_id: &str, id: i64, input: &TaskInput) -> Result<Task, AppError> {
        let sql = format!(
            "UPDATE tasks SET title = $1, description = $2, status = $3, due_date = $4, \
             updated_at = NOW() WHERE id = $5 AND user_id = $6 RETURNING {TASK_COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.due_date)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("task not found"))
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("task not found"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn email_conflict(err: sqlx::Error) -> AppError {
    let err = AppError::from(err);
    if err.kind() == ErrorKind::AlreadyExists {
        AppError::already_exists("email already registered")
    } else {
        err
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(email_conflict)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET email = COALESCE($1, email), \
             password_hash = COALESCE($2, password_hash), updated_at = NOW() \
             WHERE id = $3 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(email_conflict)?
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("user not found"));
        }
        Ok(())
    }
}
