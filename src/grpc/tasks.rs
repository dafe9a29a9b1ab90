use std::sync::Arc;

use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};

use crate::error::AppError;
use crate::grpc::RequestIdentity;
use crate::models::{Task, TaskInput, TaskStatus};
use crate::pagination::PageRequest;
use crate::pb::task::v1 as pb;
use crate::pb::task::v1::task_service_server::TaskService as TaskServiceRpc;
use crate::services::tasks::{parse_task_id, TaskService};

/// `task.v1.TaskService` on top of [`TaskService`].
#[derive(Clone)]
pub struct TaskGrpc {
    tasks: Arc<TaskService>,
}

impl TaskGrpc {
    pub fn new(tasks: Arc<TaskService>) -> Self {
        Self { tasks }
    }
}

#[tonic::async_trait]
impl TaskServiceRpc for TaskGrpc {
    async fn create_task(
        &self,
        request: Request<pb::CreateTaskRequest>,
    ) -> Result<Response<pb::CreateTaskResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();
        log::debug!("CreateTask for user {}", identity.user_id);

        let input = task_input(req.title, req.description, req.status, req.due_date_unix_ms)?;
        let task = self.tasks.create(&identity, input).await?;

        Ok(Response::new(pb::CreateTaskResponse {
            task_id: task.id.to_string(),
        }))
    }

    async fn get_task(
        &self,
        request: Request<pb::GetTaskRequest>,
    ) -> Result<Response<pb::GetTaskResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();
        log::debug!("GetTask {} for user {}", req.task_id, identity.user_id);

        let id = parse_task_id(&req.task_id)?;
        let task = self.tasks.get(&identity, id).await?;

        Ok(Response::new(pb::GetTaskResponse {
            task: Some(task_to_proto(task)),
        }))
    }

    async fn list_tasks(
        &self,
        request: Request<pb::ListTasksRequest>,
    ) -> Result<Response<pb::ListTasksResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();
        log::debug!(
            "ListTasks for user {} (page_size {})",
            identity.user_id,
            req.page_size
        );

        let status = status_from_proto(req.status)?;
        let page_request = PageRequest::new(req.page_size, &req.page_token)?;
        let page = self
            .tasks
            .list(&identity.user_id, status, page_request)
            .await?;

        Ok(Response::new(pb::ListTasksResponse {
            next_page_token: page.next_page_token(),
            total_count: i64::try_from(page.total_count).unwrap_or(i64::MAX),
            tasks: page.items.into_iter().map(task_to_proto).collect(),
        }))
    }

    async fn update_task(
        &self,
        request: Request<pb::UpdateTaskRequest>,
    ) -> Result<Response<pb::UpdateTaskResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();
        log::debug!("UpdateTask {} for user {}", req.task_id, identity.user_id);

        let id = parse_task_id(&req.task_id)?;
        let input = task_input(req.title, req.description, req.status, req.due_date_unix_ms)?;
        let task = self.tasks.update(&identity, id, input).await?;

        Ok(Response::new(pb::UpdateTaskResponse {
            task: Some(task_to_proto(task)),
        }))
    }

    async fn delete_task(
        &self,
        request: Request<pb::DeleteTaskRequest>,
    ) -> Result<Response<pb::DeleteTaskResponse>, Status> {
        let identity = request.identity()?.clone();
        let req = request.into_inner();
        log::debug!("DeleteTask {} for user {}", req.task_id, identity.user_id);

        let id = parse_task_id(&req.task_id)?;
        self.tasks.delete(&identity, id).await?;

        Ok(Response::new(pb::DeleteTaskResponse {}))
    }
}

fn task_input(
    title: String,
    description: String,
    status: i32,
    due_date_unix_ms: Option<i64>,
) -> Result<TaskInput, AppError> {
    let status =
        status_from_proto(status)?.ok_or_else(|| AppError::invalid_input("task status is required"))?;
    let due_date = due_date_unix_ms.map(unix_ms_to_datetime).transpose()?;

    Ok(TaskInput {
        title,
        description,
        status,
        due_date,
    })
}

/// `UNSPECIFIED` maps to `None`; values outside the enum are invalid.
fn status_from_proto(raw: i32) -> Result<Option<TaskStatus>, AppError> {
    match pb::TaskStatus::try_from(raw) {
        Ok(pb::TaskStatus::Unspecified) => Ok(None),
        Ok(pb::TaskStatus::Pending) => Ok(Some(TaskStatus::Pending)),
        Ok(pb::TaskStatus::Active) => Ok(Some(TaskStatus::Active)),
        Ok(pb::TaskStatus::Complete) => Ok(Some(TaskStatus::Complete)),
        Err(_) => Err(AppError::invalid_input(format!("unknown task status {raw}"))),
    }
}

fn status_to_proto(status: TaskStatus) -> pb::TaskStatus {
    match status {
        TaskStatus::Pending => pb::TaskStatus::Pending,
        TaskStatus::Active => pb::TaskStatus::Active,
        TaskStatus::Complete => pb::TaskStatus::Complete,
    }
}

fn task_to_proto(task: Task) -> pb::Task {
    pb::Task {
        task_id: task.id.to_string(),
        user_id: task.user_id,
        title: task.title,
        description: task.description,
        status: status_to_proto(task.status) as i32,
        due_date_unix_ms: task.due_date.map(|dt| dt.timestamp_millis()),
        created_at_unix_ms: task.created_at.timestamp_millis(),
        updated_at_unix_ms: task.updated_at.timestamp_millis(),
    }
}

fn unix_ms_to_datetime(ms: i64) -> Result<DateTime<Utc>, AppError> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| AppError::invalid_input("due date is out of range"))
}
