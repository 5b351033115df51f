#![allow(dead_code)]

pub mod memory_store;

pub use memory_store::MemoryForumStore;

use actix_http::Request;
use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    test, web, App, Error,
};
use forum_service::app::{self, AppState};
use forum_service::config::CorsConfig;
use forum_service::handlers;
use forum_service::middleware::{RateLimitConfig, RateLimitMiddleware};
use std::sync::Arc;

pub const TEST_BODY_LIMIT: usize = 64 * 1024;

/// Origins the test app accepts
pub fn test_cors() -> CorsConfig {
    CorsConfig {
        allowed_origins: vec!["http://localhost:5173".to_string()],
        allowed_origin_suffixes: vec![".vercel.app".to_string()],
    }
}

/// State with a generous rate limit so only dedicated tests hit it
pub fn test_state(store: Arc<MemoryForumStore>) -> AppState {
    AppState {
        store,
        environment: "test".to_string(),
        limiter: RateLimitMiddleware::with_config(RateLimitConfig {
            max_requests: 10_000,
            window_seconds: 900,
        }),
        max_body_bytes: TEST_BODY_LIMIT,
        expose_error_details: false,
    }
}

pub async fn init_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(app::build_cors(&test_cors()))
            .wrap(app::security_headers())
            .configure(app::configure(state))
            .default_service(web::to(handlers::route_not_found)),
    )
    .await
}

/// A post body that passes validation
pub fn valid_post(author: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "title": "Feeling overwhelmed with finals",
        "content": "I have three exams next week and cannot focus at all.",
        "author": author,
        "category": category,
        "isAnonymous": false,
    })
}
