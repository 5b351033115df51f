/// HTTP handlers for forum endpoints
///
/// This module contains handlers for:
/// - Posts: list, create, delete, like and unlike
/// - Comments: list, create, like and unlike
/// - Categories: the fixed category list
/// - Health: service and database status
pub mod categories;
pub mod comments;
pub mod health;
pub mod posts;

use crate::store::ForumStore;
use actix_web::{web, HttpResponse};
use std::sync::Arc;

// Re-export handler functions at module level
pub use categories::list_categories;
pub use comments::{create_comment, like_comment, list_post_comments, unlike_comment};
pub use health::{health_check, HealthState};
pub use posts::{create_post, delete_post, like_post, list_posts, unlike_post};

/// Store handle shared by every handler
pub type StoreData = web::Data<Arc<dyn ForumStore>>;

/// Fallback for unmatched routes
pub async fn route_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "Route not found" }))
}
