use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use taskhub::auth::{Identity, TokenService};
use taskhub::error::AppError;
use taskhub::grpc;
use taskhub::models::{Task, TaskFilter, TaskInput};
use taskhub::pb::task::v1 as pb;
use taskhub::pb::task::v1::task_service_client::TaskServiceClient;
use taskhub::services::TaskService;
use taskhub::store::{MemoryTaskStore, TaskStore};
use tokio::sync::oneshot;
use tonic::transport::Channel;
use tonic::{Code, Request};

const SECRET: &[u8] = b"grpc-integration-secret";

/// Counts every store call so tests can prove rejected requests never got
/// that far.
#[derive(Default)]
struct CountingStore {
    inner: MemoryTaskStore,
    calls: AtomicUsize,
}

impl CountingStore {
    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for CountingStore {
    async fn insert(&self, user_id: &str, input: &TaskInput) -> Result<Task, AppError> {
        self.touch();
        self.inner.insert(user_id, input).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Task, AppError> {
        self.touch();
        self.inner.find_by_id(id).await
    }

    async fn find_page(
        &self,
        filter: &TaskFilter,
        after: Option<i64>,
        limit: u32,
    ) -> Result<Vec<Task>, AppError> {
        self.touch();
        self.inner.find_page(filter, after, limit).await
    }

    async fn count(&self, filter: &TaskFilter) -> Result<u64, AppError> {
        self.touch();
        self.inner.count(filter).await
    }

    async fn update(&self, user_id: &str, id: i64, input: &TaskInput) -> Result<Task, AppError> {
        self.touch();
        self.inner.update(user_id, id, input).await
    }

    async fn delete(&self, user_id: &str, id: i64) -> Result<(), AppError> {
        self.touch();
        self.inner.delete(user_id, id).await
    }
}

struct TestServer {
    client: TaskServiceClient<Channel>,
    store: Arc<CountingStore>,
    tokens: Arc<TokenService>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start() -> Self {
        // Find an available port
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
        let addr: SocketAddr = listener.local_addr().unwrap();
        drop(listener);

        let store = Arc::new(CountingStore::default());
        let tokens = Arc::new(TokenService::new(SECRET, Duration::hours(1)));
        let tasks = Arc::new(TaskService::new(store.clone()));
        let (tx, rx) = oneshot::channel::<()>();

        let server_tokens = tokens.clone();
        tokio::spawn(async move {
            grpc::serve(addr, tasks, server_tokens, async {
                let _ = rx.await;
            })
            .await
            .expect("task service failed");
        });

        let endpoint = format!("http://{}", addr);
        let mut attempts = 0;
        let client = loop {
            match TaskServiceClient::connect(endpoint.clone()).await {
                Ok(client) => break client,
                Err(err) if attempts < 50 => {
                    attempts += 1;
                    log::debug!("server not ready yet: {}", err);
                    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                }
                Err(err) => panic!("Failed to connect to {}: {}", endpoint, err),
            }
        };

        Self {
            client,
            store,
            tokens,
            shutdown: Some(tx),
        }
    }

    fn token_for(&self, user_id: &str) -> String {
        self.tokens
            .issue(&Identity {
                user_id: user_id.to_string(),
                email: format!("{}@example.com", user_id),
            })
            .unwrap()
            .token
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn authorized<T>(message: T, token: &str) -> Request<T> {
    let mut request = Request::new(message);
    request.metadata_mut().insert(
        "authorization",
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}

fn create(title: &str, status: pb::TaskStatus) -> pb::CreateTaskRequest {
    pb::CreateTaskRequest {
        title: title.to_string(),
        description: format!("{} description", title),
        status: status as i32,
        due_date_unix_ms: None,
    }
}

#[test_log::test(tokio::test)]
async fn test_requests_without_valid_token_never_reach_the_store() {
    let mut server = TestServer::start().await;

    let err = server
        .client
        .create_task(Request::new(create("no auth", pb::TaskStatus::Pending)))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);
    assert_eq!(err.message(), "missing authorization token");

    let err = server
        .client
        .list_tasks(authorized(pb::ListTasksRequest::default(), "garbage"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);
    assert_eq!(err.message(), "invalid token");

    let foreign = TokenService::new(b"another-secret", Duration::hours(1))
        .issue(&Identity {
            user_id: "1".to_string(),
            email: "a@example.com".to_string(),
        })
        .unwrap()
        .token;
    let err = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: "1".to_string(),
            },
            &foreign,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);

    let mut request = Request::new(pb::DeleteTaskRequest {
        task_id: "1".to_string(),
    });
    request
        .metadata_mut()
        .insert("authorization", "Basic dXNlcjpwYXNz".parse().unwrap());
    let err = server.client.delete_task(request).await.unwrap_err();
    assert_eq!(err.code(), Code::Unauthenticated);
    assert_eq!(err.message(), "invalid authorization header");

    assert_eq!(server.store.calls.load(Ordering::SeqCst), 0);
}

#[test_log::test(tokio::test)]
async fn test_task_crud_over_grpc() {
    let mut server = TestServer::start().await;
    let token = server.token_for("7");

    let created = server
        .client
        .create_task(authorized(
            pb::CreateTaskRequest {
                due_date_unix_ms: Some(1_714_564_800_000),
                ..create("write report", pb::TaskStatus::Pending)
            },
            &token,
        ))
        .await
        .unwrap()
        .into_inner();
    assert!(!created.task_id.is_empty());

    let task = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: created.task_id.clone(),
            },
            &token,
        ))
        .await
        .unwrap()
        .into_inner()
        .task
        .unwrap();
    assert_eq!(task.task_id, created.task_id);
    assert_eq!(task.user_id, "7");
    assert_eq!(task.title, "write report");
    assert_eq!(task.status, pb::TaskStatus::Pending as i32);
    assert_eq!(task.due_date_unix_ms, Some(1_714_564_800_000));

    let updated = server
        .client
        .update_task(authorized(
            pb::UpdateTaskRequest {
                task_id: created.task_id.clone(),
                title: "write final report".to_string(),
                description: String::new(),
                status: pb::TaskStatus::Complete as i32,
                due_date_unix_ms: None,
            },
            &token,
        ))
        .await
        .unwrap()
        .into_inner()
        .task
        .unwrap();
    assert_eq!(updated.title, "write final report");
    assert_eq!(updated.status, pb::TaskStatus::Complete as i32);
    assert_eq!(updated.due_date_unix_ms, None);
    assert!(updated.updated_at_unix_ms >= task.updated_at_unix_ms);

    server
        .client
        .delete_task(authorized(
            pb::DeleteTaskRequest {
                task_id: created.task_id.clone(),
            },
            &token,
        ))
        .await
        .unwrap();

    let err = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: created.task_id,
            },
            &token,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);
}

#[test_log::test(tokio::test)]
async fn test_invalid_arguments() {
    let mut server = TestServer::start().await;
    let token = server.token_for("7");

    let err = server
        .client
        .create_task(authorized(create("", pb::TaskStatus::Pending), &token))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = server
        .client
        .create_task(authorized(create("no status", pb::TaskStatus::Unspecified), &token))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: "not-a-number".to_string(),
            },
            &token,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = server
        .client
        .list_tasks(authorized(
            pb::ListTasksRequest {
                page_token: "%%%".to_string(),
                ..Default::default()
            },
            &token,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);

    let err = server
        .client
        .list_tasks(authorized(
            pb::ListTasksRequest {
                page_size: -1,
                ..Default::default()
            },
            &token,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::InvalidArgument);
}

#[test_log::test(tokio::test)]
async fn test_tasks_are_scoped_to_their_owner() {
    let mut server = TestServer::start().await;
    let alice = server.token_for("1");
    let bob = server.token_for("2");

    let created = server
        .client
        .create_task(authorized(create("alice only", pb::TaskStatus::Active), &alice))
        .await
        .unwrap()
        .into_inner();

    let err = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: created.task_id.clone(),
            },
            &bob,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);

    let err = server
        .client
        .delete_task(authorized(
            pb::DeleteTaskRequest {
                task_id: created.task_id.clone(),
            },
            &bob,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);

    let listed = server
        .client
        .list_tasks(authorized(pb::ListTasksRequest::default(), &bob))
        .await
        .unwrap()
        .into_inner();
    assert!(listed.tasks.is_empty());
    assert_eq!(listed.total_count, 0);
    assert!(listed.next_page_token.is_empty());

    // Still there for its owner
    let task = server
        .client
        .get_task(authorized(
            pb::GetTaskRequest {
                task_id: created.task_id,
            },
            &alice,
        ))
        .await
        .unwrap()
        .into_inner()
        .task
        .unwrap();
    assert_eq!(task.title, "alice only");
}

#[test_log::test(tokio::test)]
async fn test_list_pages_through_every_task_once() {
    let mut server = TestServer::start().await;
    let token = server.token_for("5");

    for i in 0..25 {
        let status = if i % 5 == 0 {
            pb::TaskStatus::Complete
        } else {
            pb::TaskStatus::Pending
        };
        server
            .client
            .create_task(authorized(create(&format!("task {}", i), status), &token))
            .await
            .unwrap();
    }

    let mut seen = Vec::new();
    let mut page_sizes = Vec::new();
    let mut page_token = String::new();
    loop {
        let page = server
            .client
            .list_tasks(authorized(
                pb::ListTasksRequest {
                    status: pb::TaskStatus::Unspecified as i32,
                    page_size: 10,
                    page_token: page_token.clone(),
                },
                &token,
            ))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(page.total_count, 25);
        page_sizes.push(page.tasks.len());
        seen.extend(page.tasks.into_iter().map(|task| task.title));

        if page.next_page_token.is_empty() {
            break;
        }
        page_token = page.next_page_token;
    }

    assert_eq!(page_sizes, vec![10, 10, 5]);
    let expected: Vec<String> = (0..25).map(|i| format!("task {}", i)).collect();
    assert_eq!(seen, expected);

    let completed = server
        .client
        .list_tasks(authorized(
            pb::ListTasksRequest {
                status: pb::TaskStatus::Complete as i32,
                page_size: 0,
                page_token: String::new(),
            },
            &token,
        ))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(completed.total_count, 5);
    assert_eq!(completed.tasks.len(), 5);
    assert!(completed.next_page_token.is_empty());
    assert!(completed
        .tasks
        .iter()
        .all(|task| task.status == pb::TaskStatus::Complete as i32));
}
