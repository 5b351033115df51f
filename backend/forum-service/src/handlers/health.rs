use crate::store::ForumStore;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

pub struct HealthState {
    store: Arc<dyn ForumStore>,
    environment: String,
}

impl HealthState {
    pub fn new(store: Arc<dyn ForumStore>, environment: impl Into<String>) -> Self {
        Self {
            store,
            environment: environment.into(),
        }
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    timestamp: String,
    environment: &'a str,
    database: DatabaseStatus,
}

/// Liveness plus database connectivity. Always answers 200 so the process
/// stays in rotation while the database is down.
pub async fn health_check(state: web::Data<HealthState>) -> HttpResponse {
    let database = if state.store.ping().await {
        DatabaseStatus::Connected
    } else {
        DatabaseStatus::Disconnected
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339(),
        environment: &state.environment,
        database,
    })
}
