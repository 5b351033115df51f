/// Post service - handles post listing, creation, deletion and likes
use super::require_user_id;
use crate::error::{AppError, Result};
use crate::models::{
    Authorship, Category, CreatePostRequest, LikeAction, LikeOutcome, NewPost, PostFilter,
    PostResponse,
};
use crate::store::ForumStore;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Category query value that disables filtering
const ALL_CATEGORIES: &str = "all";

pub struct PostService {
    store: Arc<dyn ForumStore>,
}

/// Result of resolving the listing query parameters
enum Listing {
    Filter(PostFilter),
    /// The requested category does not exist, so nothing can match
    Empty,
}

impl PostService {
    pub fn new(store: Arc<dyn ForumStore>) -> Self {
        Self { store }
    }

    fn resolve_filter(category: Option<&str>, search: Option<&str>) -> Listing {
        let category = match category {
            None | Some("") | Some(ALL_CATEGORIES) => None,
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(_) => return Listing::Empty,
            },
        };

        let search = search.filter(|term| !term.is_empty()).map(str::to_string);

        Listing::Filter(PostFilter { category, search })
    }

    /// List posts newest first with their comments expanded
    pub async fn list_posts(
        &self,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<PostResponse>> {
        let filter = match Self::resolve_filter(category, search) {
            Listing::Filter(filter) => filter,
            Listing::Empty => return Ok(Vec::new()),
        };

        let posts = self.store.list_posts(&filter).await?;

        Ok(posts
            .into_iter()
            .map(|(post, comments)| PostResponse::new(post, comments))
            .collect())
    }

    /// Create a post. Anonymous posts are stored under the anonymous author.
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<PostResponse> {
        let category = req
            .category
            .parse::<Category>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let Authorship { author, avatar } = Authorship::derive(&req.author, req.is_anonymous);

        let new_post = NewPost {
            title: req.title.trim().to_string(),
            content: req.content.trim().to_string(),
            author,
            avatar,
            category,
            is_anonymous: req.is_anonymous,
            tags: req.tags.iter().map(|tag| tag.trim().to_string()).collect(),
        };
        new_post.validate()?;

        let post = self.store.create_post(new_post).await?;
        info!(post_id = %post.id, category = %post.category, "Post created");

        Ok(PostResponse::new(post, Vec::new()))
    }

    /// Delete a post and its comments.
    ///
    /// Callers may delete their own posts; anonymous posts may be deleted by
    /// anyone.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Option<&str>) -> Result<()> {
        let post = self
            .store
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let is_owner = user_id.is_some_and(|id| id == post.author);
        if !is_owner && !Authorship::is_anonymous_author(&post.author) {
            return Err(AppError::Forbidden(
                "You can only delete your own posts".to_string(),
            ));
        }

        if !self.store.delete_post(post_id).await? {
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        info!(post_id = %post_id, "Post deleted");
        Ok(())
    }

    /// Like the post if the caller has not, otherwise remove the like
    pub async fn toggle_like(&self, post_id: Uuid, user_id: Option<&str>) -> Result<LikeOutcome> {
        self.update_likes(post_id, user_id, LikeAction::Toggle).await
    }

    /// Remove the caller's like, decrementing the counter regardless
    pub async fn unlike(&self, post_id: Uuid, user_id: Option<&str>) -> Result<LikeOutcome> {
        self.update_likes(post_id, user_id, LikeAction::ForceUnlike)
            .await
    }

    async fn update_likes(
        &self,
        post_id: Uuid,
        user_id: Option<&str>,
        action: LikeAction,
    ) -> Result<LikeOutcome> {
        let user_id = require_user_id(user_id)?;

        self.store
            .update_post_likes(post_id, user_id, action)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_filter_all_means_unfiltered() {
        for category in [None, Some(""), Some("all")] {
            match PostService::resolve_filter(category, None) {
                Listing::Filter(filter) => {
                    assert!(filter.category.is_none());
                    assert!(filter.search.is_none());
                }
                Listing::Empty => panic!("expected a filter for {:?}", category),
            }
        }
    }

    #[test]
    fn test_resolve_filter_unknown_category_matches_nothing() {
        assert!(matches!(
            PostService::resolve_filter(Some("Gardening"), None),
            Listing::Empty
        ));
    }

    #[test]
    fn test_resolve_filter_known_category_and_search() {
        match PostService::resolve_filter(Some("Sleep Issues"), Some("night")) {
            Listing::Filter(filter) => {
                assert_eq!(filter.category, Some(Category::SleepIssues));
                assert_eq!(filter.search.as_deref(), Some("night"));
            }
            Listing::Empty => panic!("expected a filter"),
        }
    }

    #[test]
    fn test_resolve_filter_ignores_empty_search() {
        match PostService::resolve_filter(None, Some("")) {
            Listing::Filter(filter) => assert!(filter.search.is_none()),
            Listing::Empty => panic!("expected a filter"),
        }
    }
}
