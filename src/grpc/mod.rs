//! gRPC transport for the task service.

pub mod interceptor;
pub mod tasks;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tonic::codegen::InterceptedService;
use tonic::transport::Server;

use crate::auth::TokenService;
use crate::pb::task::v1::task_service_server::TaskServiceServer;
use crate::services::TaskService;

pub use interceptor::{AuthInterceptor, RequestIdentity};
pub use tasks::TaskGrpc;

/// The task service with authentication in front of every method.
pub fn task_server(
    tasks: Arc<TaskService>,
    tokens: Arc<TokenService>,
) -> InterceptedService<TaskServiceServer<TaskGrpc>, AuthInterceptor> {
    TaskServiceServer::with_interceptor(TaskGrpc::new(tasks), AuthInterceptor::new(tokens))
}

/// Serves until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    tasks: Arc<TaskService>,
    tokens: Arc<TokenService>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    Server::builder()
        .add_service(task_server(tasks, tokens))
        .serve_with_shutdown(addr, shutdown)
        .await
}
