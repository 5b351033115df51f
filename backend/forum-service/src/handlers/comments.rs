/// Comment handlers - HTTP endpoints for comment operations
use super::StoreData;
use crate::error::{FailureContext, Result};
use crate::models::{CreateCommentRequest, UserIdRequest};
use crate::services::{parse_id, CommentService};
use actix_web::{web, HttpResponse};

fn service(store: &StoreData) -> CommentService {
    CommentService::new(store.get_ref().clone())
}

/// List the comments on a post, oldest first
pub async fn list_post_comments(
    store: StoreData,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_id(&path, "Invalid post ID")?;

    let comments = service(&store)
        .list_comments(post_id)
        .await
        .failure_context("Failed to fetch comments")?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a comment on an existing post
pub async fn create_comment(
    store: StoreData,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let comment = service(&store)
        .create_comment(req.into_inner())
        .await
        .failure_context("Failed to create comment")?;

    Ok(HttpResponse::Created().json(comment))
}

/// Toggle the caller's like on a comment
pub async fn like_comment(
    store: StoreData,
    path: web::Path<String>,
    body: Option<web::Json<UserIdRequest>>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&path, "Invalid comment ID")?;
    let user_id = body.as_ref().and_then(|b| b.user_id());

    let outcome = service(&store)
        .toggle_like(comment_id, user_id)
        .await
        .failure_context("Failed to update like")?;

    Ok(HttpResponse::Ok().json(outcome))
}

/// Remove the caller's like from a comment
pub async fn unlike_comment(
    store: StoreData,
    path: web::Path<String>,
    body: Option<web::Json<UserIdRequest>>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&path, "Invalid comment ID")?;
    let user_id = body.as_ref().and_then(|b| b.user_id());

    let outcome = service(&store)
        .unlike(comment_id, user_id)
        .await
        .failure_context("Failed to unlike comment")?;

    Ok(HttpResponse::Ok().json(outcome))
}
