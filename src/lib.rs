#![doc = "The `taskhub` library crate."]
#![doc = ""]
#![doc = "Domain models, stores, token authentication, the gRPC task service and the"]
#![doc = "HTTP user service. The `task-service` and `user-service` binaries wire these"]
#![doc = "together from the environment."]

pub mod auth;
pub mod config;
pub mod error;
pub mod grpc;
pub mod models;
pub mod pagination;
pub mod pb;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::config::Config;
pub use crate::error::{AppError, ErrorKind};
