/// Comment service - handles comment listing, creation and likes
use super::{parse_id, require_user_id};
use crate::error::{AppError, Result};
use crate::models::{
    Authorship, CommentResponse, CreateCommentRequest, LikeAction, LikeOutcome, NewComment,
};
use crate::store::ForumStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct CommentService {
    store: Arc<dyn ForumStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self { store }
    }

    /// Comments on a post, oldest first. An unknown post has no comments.
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentResponse>> {
        let comments = self.store.list_comments(post_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }

    /// Attach a comment to an existing post.
    ///
    /// The parent post is checked before the content is validated, so a
    /// missing post is reported as 404 even when the body is also invalid.
    pub async fn create_comment(&self, req: CreateCommentRequest) -> Result<CommentResponse> {
        let post_id = parse_id(&req.post_id, "Invalid post ID")?;

        if self.store.find_post(post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        let Authorship { author, avatar } = Authorship::derive(&req.author, req.is_anonymous);

        let new_comment = NewComment {
            post_id,
            content: req.content.trim().to_string(),
            author,
            avatar,
            is_anonymous: req.is_anonymous,
        };
        new_comment.validate()?;

        // The post can disappear between the check and the insert
        let comment = self
            .store
            .create_comment(new_comment)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        Ok(CommentResponse::from(comment))
    }

    pub async fn toggle_like(
        &self,
        comment_id: Uuid,
        user_id: Option<&str>,
    ) -> Result<LikeOutcome> {
        self.update_likes(comment_id, user_id, LikeAction::Toggle)
            .await
    }

    pub async fn unlike(&self, comment_id: Uuid, user_id: Option<&str>) -> Result<LikeOutcome> {
        self.update_likes(comment_id, user_id, LikeAction::ForceUnlike)
            .await
    }

    async fn update_likes(
        &self,
        comment_id: Uuid,
        user_id: Option<&str>,
        action: LikeAction,
    ) -> Result<LikeOutcome> {
        let user_id = require_user_id(user_id)?;

        self.store
            .update_comment_likes(comment_id, user_id, action)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }
}
