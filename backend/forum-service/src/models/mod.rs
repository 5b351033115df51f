/// Data models for forum-service
///
/// This module defines structures for:
/// - Post: Top-level forum submissions with title, content and category
/// - Comment: Replies attached to exactly one post
/// - Category: The closed set of forum categories
/// - Like state shared by posts and comments
/// - Request bodies accepted by the API
pub mod authorship;
pub mod category;
pub mod likes;
pub mod requests;

pub use authorship::{Authorship, ANONYMOUS_AUTHOR, ANONYMOUS_AVATAR};
pub use category::{Category, UnknownCategory};
pub use likes::{LikeAction, LikeOutcome, LikeState};
pub use requests::{CreateCommentRequest, CreatePostRequest, UserIdRequest};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Post row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub avatar: String,
    #[sqlx(try_from = "String")]
    pub category: Category,
    pub likes: i32,
    pub liked_by: Vec<String>,
    #[serde(rename = "timestamp")]
    pub posted_at: DateTime<Utc>,
    pub is_anonymous: bool,
    pub tags: Vec<String>,
    pub is_moderated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub author: String,
    pub avatar: String,
    pub post_id: Uuid,
    pub likes: i32,
    pub liked_by: Vec<String>,
    #[serde(rename = "timestamp")]
    pub posted_at: DateTime<Utc>,
    pub is_anonymous: bool,
    pub is_moderated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn like_state(&self) -> LikeState {
        LikeState::new(self.likes, self.liked_by.clone())
    }
}

impl Comment {
    pub fn like_state(&self) -> LikeState {
        LikeState::new(self.likes, self.liked_by.clone())
    }
}

/// Validated post ready to be inserted
#[derive(Debug, Clone, Validate)]
pub struct NewPost {
    #[validate(length(min = 10, max = 200, message = "title must be 10-200 characters"))]
    pub title: String,
    #[validate(length(min = 20, max = 2000, message = "content must be 20-2000 characters"))]
    pub content: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "avatar is required"))]
    pub avatar: String,
    pub category: Category,
    pub is_anonymous: bool,
    pub tags: Vec<String>,
}

/// Validated comment ready to be inserted
#[derive(Debug, Clone, Validate)]
pub struct NewComment {
    pub post_id: Uuid,
    #[validate(length(min = 5, max = 500, message = "content must be 5-500 characters"))]
    pub content: String,
    #[validate(length(min = 1, message = "author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "avatar is required"))]
    pub avatar: String,
    pub is_anonymous: bool,
}

/// Listing filter for posts
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Exact category match; `None` lists every category
    pub category: Option<Category>,
    /// Case-insensitive substring over title, content and tags
    pub search: Option<String>,
}

/// Post as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
    pub is_liked: bool,
}

/// Comment as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(flatten)]
    pub comment: Comment,
    pub is_liked: bool,
}

impl PostResponse {
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            post,
            comments,
            is_liked: false,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment,
            is_liked: false,
        }
    }
}
