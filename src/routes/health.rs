use actix_web::{get, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SERVICE_NAME: &str = "user-service";

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthReport {
    fn now() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Liveness probe. Public, never touches storage.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthReport::now())
}
