use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use forum_service::error::{AppError, Result};
use forum_service::models::{
    Comment, LikeAction, LikeOutcome, NewComment, NewPost, Post, PostFilter,
};
use forum_service::ForumStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct State {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    ticks: i64,
}

impl State {
    /// Strictly increasing timestamps so ordering assertions are deterministic
    fn next_timestamp(&mut self, epoch: DateTime<Utc>) -> DateTime<Utc> {
        self.ticks += 1;
        epoch + Duration::milliseconds(self.ticks)
    }
}

/// In-memory [`ForumStore`] used by the HTTP tests
pub struct MemoryForumStore {
    state: Mutex<State>,
    epoch: DateTime<Utc>,
    failing: AtomicBool,
    available: AtomicBool,
}

impl Default for MemoryForumStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryForumStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            epoch: Utc::now(),
            failing: AtomicBool::new(false),
            available: AtomicBool::new(true),
        }
    }

    /// Make every data operation fail like a lost database connection
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Control what the health probe reports
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().unwrap().comments.len()
    }

    pub fn post(&self, post_id: Uuid) -> Option<Post> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Same semantics as the SQL listing: exact category, case-insensitive
/// substring over title, content and tags
fn matches_filter(filter: &PostFilter, post: &Post) -> bool {
    if let Some(category) = filter.category {
        if post.category != category {
            return false;
        }
    }

    match &filter.search {
        Some(term) => {
            let term = term.to_lowercase();
            post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term)
                || post.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
        }
        None => true,
    }
}

#[async_trait]
impl ForumStore for MemoryForumStore {
    async fn list_posts(&self, filter: &PostFilter) -> Result<Vec<(Post, Vec<Comment>)>> {
        self.check()?;
        let state = self.state.lock().unwrap();

        let mut posts: Vec<Post> = state
            .posts
            .iter()
            .filter(|p| matches_filter(filter, p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

        Ok(posts
            .into_iter()
            .map(|post| {
                let mut comments: Vec<Comment> = state
                    .comments
                    .iter()
                    .filter(|c| c.post_id == post.id)
                    .cloned()
                    .collect();
                comments.sort_by(|a, b| a.posted_at.cmp(&b.posted_at));
                (post, comments)
            })
            .collect())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let now = state.next_timestamp(self.epoch);

        let post = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            author: post.author,
            avatar: post.avatar,
            category: post.category,
            likes: 0,
            liked_by: Vec::new(),
            posted_at: now,
            is_anonymous: post.is_anonymous,
            tags: post.tags,
            is_moderated: false,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        self.check()?;
        Ok(self.post(post_id))
    }

    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        self.check()?;
        let mut state = self.state.lock().unwrap();

        state.comments.retain(|c| c.post_id != post_id);
        let before = state.posts.len();
        state.posts.retain(|p| p.id != post_id);
        Ok(state.posts.len() < before)
    }

    async fn update_post_likes(
        &self,
        post_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let now = state.next_timestamp(self.epoch);

        let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        let mut likes = post.like_state();
        let outcome = likes.apply(action, user_id);
        post.likes = likes.likes;
        post.liked_by = likes.liked_by;
        post.updated_at = now;
        Ok(Some(outcome))
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        self.check()?;
        let state = self.state.lock().unwrap();

        let mut comments: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.posted_at.cmp(&b.posted_at));
        Ok(comments)
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Option<Comment>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let now = state.next_timestamp(self.epoch);

        let Some(post) = state.posts.iter_mut().find(|p| p.id == comment.post_id) else {
            return Ok(None);
        };
        post.updated_at = now;

        let comment = Comment {
            id: Uuid::new_v4(),
            content: comment.content,
            author: comment.author,
            avatar: comment.avatar,
            post_id: comment.post_id,
            likes: 0,
            liked_by: Vec::new(),
            posted_at: now,
            is_anonymous: comment.is_anonymous,
            is_moderated: false,
            created_at: now,
            updated_at: now,
        };
        state.comments.push(comment.clone());
        Ok(Some(comment))
    }

    async fn update_comment_likes(
        &self,
        comment_id: Uuid,
        user_id: &str,
        action: LikeAction,
    ) -> Result<Option<LikeOutcome>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let now = state.next_timestamp(self.epoch);

        let Some(comment) = state.comments.iter_mut().find(|c| c.id == comment_id) else {
            return Ok(None);
        };
        let mut likes = comment.like_state();
        let outcome = likes.apply(action, user_id);
        comment.likes = likes.likes;
        comment.liked_by = likes.liked_by;
        comment.updated_at = now;
        Ok(Some(outcome))
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst) && !self.failing.load(Ordering::SeqCst)
    }
}
