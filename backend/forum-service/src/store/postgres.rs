use super::ForumStore;
use crate::db::{comment_repo, post_repo};
use crate::error::Result;
use crate::models::{Comment, LikeAction, LikeOutcome, NewComment, NewPost, Post, PostFilter};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// [`ForumStore`] backed by PostgreSQL.
///
/// Every read-modify-write runs in a transaction holding a row lock, so
/// concurrent like toggles and comment inserts on the same post serialize.
#[derive(Clone)]
pub struct PgForumStore {
    pool: PgPool,
}

impl PgForumStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ForumStore for PgForumStore {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<(Post, Vec<Comment>)>> {
        let mut conn = self.pool.acquire().await?;

        let posts = post_repo::find_posts(&mut conn, filter).await?;
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let comments = comment_repo::find_comments_by_posts(&mut conn, &post_ids).await?;

        let mut by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id).or_default().push(comment);
        }

        Ok(posts
            .into_iter()
            .map(|post| {
                let comments = by_post.remove(&post.id).unwrap_or_default();
                (post, comments)
            })
            .collect())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        let mut conn = self.pool.acquire().await?;
        let post = post_repo::create_post(&mut conn, &post).await?;
        debug!(post_id = %post.id, category = %post.category, "Post created");
        Ok(post)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let mut conn = self.pool.acquire().await?;
        Ok(post_repo::find_post_by_id(&mut conn, post_id).await?)
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed_comments = comment_repo::delete_comments_by_post(&mut tx, post_id).await?;
        let deleted = post_repo::delete_post(&mut tx, post_id).await?;

        tx.commit().await?;

        if deleted {
            debug!(post_id = %post_id, removed_comments, "Post deleted");
        }
        Ok(deleted)
    }

    async fn update_post_likes(
        &self,
        post_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut state) = post_repo::lock_like_state(&mut tx, post_id).await? else {
            return Ok(None);
        };
        let outcome = state.apply(action, user_id);
        post_repo::update_like_state(&mut tx, post_id, &state).await?;

        tx.commit().await?;
        Ok(Some(outcome))
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let mut conn = self.pool.acquire().await?;
        Ok(comment_repo::find_comments_by_post(&mut conn, post_id).await?)
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Option<Comment>> {
        let mut tx = self.pool.begin().await?;

        if !post_repo::lock_post(&mut tx, comment.post_id).await? {
            return Ok(None);
        }
        let created = comment_repo::create_comment(&mut tx, &comment).await?;
        post_repo::touch_post(&mut tx, comment.post_id).await?;

        tx.commit().await?;

        debug!(comment_id = %created.id, post_id = %created.post_id, "Comment created");
        Ok(Some(created))
    }

    async fn update_comment_likes(
        &self,
        comment_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>> {
        let mut tx = self.pool.begin().await?;

        let Some(mut state) = comment_repo::lock_like_state(&mut tx, comment_id).await? else {
            return Ok(None);
        };
        let outcome = state.apply(action, user_id);
        comment_repo::update_like_state(&mut tx, comment_id, &state).await?;

        tx.commit().await?;
        Ok(Some(outcome))
    }

    async fn ping(&self) -> bool {
        let probe = sqlx::query("SELECT 1").execute(&self.pool);
        matches!(tokio::time::timeout(PING_TIMEOUT, probe).await, Ok(Ok(_)))
    }
}
