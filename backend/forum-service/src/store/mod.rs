/// Persistence boundary for the forum.
///
/// Handlers and services only talk to [`ForumStore`]; the PostgreSQL
/// implementation lives in [`postgres`].
pub mod postgres;

pub use postgres::PgForumStore;

use crate::error::Result;
use crate::models::{Comment, LikeAction, LikeOutcome, NewComment, NewPost, Post, PostFilter};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ForumStore: Send + Sync {
    /// Posts matching `filter`, newest first, each with its comments oldest first
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<(Post, Vec<Comment>)>>;

    async fn create_post(&self, post: NewPost) -> Result<Post>;

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Delete a post together with its comments.
    /// Returns false when the post did not exist.
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;

    /// Atomically apply a like action to a post.
    /// `None` means the post does not exist.
    async fn update_post_likes(
        &self,
        post_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>>;

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    /// Attach a comment to its post. `None` means the post does not exist.
    async fn create_comment(&self, comment: NewComment) -> Result<Option<Comment>>;

    /// Atomically apply a like action to a comment.
    /// `None` means the comment does not exist.
    async fn update_comment_likes(
        &self,
        comment_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>>;

    /// Whether the backing store is reachable right now
    async fn ping(&self) -> bool;
}
