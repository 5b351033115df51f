/// Post handlers - HTTP endpoints for post operations
use super::StoreData;
use crate::error::{FailureContext, Result};
use crate::models::{CreatePostRequest, UserIdRequest};
use crate::services::{parse_id, PostService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

fn service(store: &StoreData) -> PostService {
    PostService::new(store.get_ref().clone())
}

/// List posts, optionally filtered by category and search term
pub async fn list_posts(
    store: StoreData,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let posts = service(&store)
        .list_posts(query.category.as_deref(), query.search.as_deref())
        .await
        .failure_context("Failed to fetch posts")?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
pub async fn create_post(
    store: StoreData,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = service(&store)
        .create_post(req.into_inner())
        .await
        .failure_context("Failed to create post")?;

    Ok(HttpResponse::Created().json(post))
}

/// Delete a post and all of its comments
pub async fn delete_post(
    store: StoreData,
    path: web::Path<String>,
    body: Option<web::Json<UserIdRequest>>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "Invalid post ID")?;
    let user_id = body.as_ref().and_then(|b| b.user_id());

    service(&store)
        .delete_post(post_id, user_id)
        .await
        .failure_context("Failed to delete post")?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Post deleted successfully"
    })))
}

/// Toggle the caller's like on a post
pub async fn like_post(
    store: StoreData,
    path: web::Path<String>,
    body: Option<web::Json<UserIdRequest>>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "Invalid post ID")?;
    let user_id = body.as_ref().and_then(|b| b.user_id());

    let outcome = service(&store)
        .toggle_like(post_id, user_id)
        .await
        .failure_context("Failed to update like")?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Remove the caller's like from a post
pub async fn unlike_post(
    store: StoreData,
    path: web::Path<String>,
    body: Option<web::Json<UserIdRequest>>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "Invalid post ID")?;
    let user_id = body.as_ref().and_then(|b| b.user_id());

    let outcome = service(&store)
        .unlike(post_id, user_id)
        .await
        .failure_context("Failed to unlike post")?;

    Ok(HttpResponse::Ok().json(outcome))
}
