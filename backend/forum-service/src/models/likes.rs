use serde::{Deserialize, Serialize};

/// What a like request does to the caller's membership in `liked_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    /// Flip membership: like if absent, unlike if present
    Toggle,
    /// Remove membership and decrement regardless of prior state
    ForceUnlike,
}

/// Like counter and liker list as stored on a post or comment row
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct LikeState {
    pub likes: i32,
    pub liked_by: Vec<String>,
}

/// Result returned to the client after a like operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    pub likes: i32,
    pub is_liked: bool,
}

impl LikeState {
    pub fn new(likes: i32, liked_by: Vec<String>) -> Self {
        Self { likes, liked_by }
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }

    /// Apply `action` for `user_id` and report the new count.
    ///
    /// `likes` never drops below zero. A toggle reports `is_liked` as the
    /// negation of the membership observed before the change.
    pub fn apply(&mut self, action: LikeAction, user_id: &str) -> LikeOutcome {
        let is_liked = match action {
            LikeAction::Toggle if self.contains(user_id) => {
                self.remove(user_id);
                false
            }
            LikeAction::Toggle => {
                self.liked_by.push(user_id.to_string());
                self.likes = self.likes.saturating_add(1);
                true
            }
            LikeAction::ForceUnlike => {
                self.remove(user_id);
                false
            }
        };

        LikeOutcome {
            likes: self.likes,
            is_liked,
        }
    }

    fn remove(&mut self, user_id: &str) {
        self.liked_by.retain(|id| id != user_id);
        self.likes = (self.likes - 1).max(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_likes_then_unlikes() {
        let mut state = LikeState::default();

        let first = state.apply(LikeAction::Toggle, "user-1");
        assert_eq!(first, LikeOutcome { likes: 1, is_liked: true });
        assert_eq!(state.liked_by, vec!["user-1".to_string()]);

        let second = state.apply(LikeAction::Toggle, "user-1");
        assert_eq!(second, LikeOutcome { likes: 0, is_liked: false });
        assert!(state.liked_by.is_empty());
    }

    #[test]
    fn test_double_toggle_restores_original_state() {
        let mut state = LikeState::new(2, vec!["a".into(), "b".into()]);
        let original = state.clone();

        state.apply(LikeAction::Toggle, "c");
        state.apply(LikeAction::Toggle, "c");
        assert_eq!(state, original);

        state.apply(LikeAction::Toggle, "a");
        state.apply(LikeAction::Toggle, "a");
        assert_eq!(state.likes, original.likes);
        assert!(state.contains("a"));
    }

    #[test]
    fn test_count_tracks_membership_across_toggles() {
        let mut state = LikeState::default();
        let users = ["ana", "ben", "ana", "cho", "ben", "dee", "cho", "ana"];

        for user in users {
            state.apply(LikeAction::Toggle, user);
            assert_eq!(state.likes as usize, state.liked_by.len());
            assert!(state.likes >= 0);
        }

        state.apply(LikeAction::ForceUnlike, "ana");
        assert_eq!(state.likes as usize, state.liked_by.len());
    }

    #[test]
    fn test_force_unlike_is_idempotent_at_zero() {
        let mut state = LikeState::new(1, vec!["user-1".into()]);

        for _ in 0..3 {
            let outcome = state.apply(LikeAction::ForceUnlike, "user-1");
            assert_eq!(outcome, LikeOutcome { likes: 0, is_liked: false });
        }
        assert!(state.liked_by.is_empty());
    }

    #[test]
    fn test_force_unlike_decrements_without_membership() {
        let mut state = LikeState::new(2, vec!["a".into(), "b".into()]);

        let outcome = state.apply(LikeAction::ForceUnlike, "stranger");
        assert_eq!(outcome.likes, 1);
        assert_eq!(state.liked_by.len(), 2);
    }

    #[test]
    fn test_toggle_removes_duplicate_entries() {
        let mut state = LikeState::new(2, vec!["dup".into(), "dup".into()]);

        let outcome = state.apply(LikeAction::Toggle, "dup");
        assert!(!outcome.is_liked);
        assert_eq!(outcome.likes, 1);
        assert!(!state.contains("dup"));
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let json = serde_json::to_value(LikeOutcome { likes: 3, is_liked: true }).unwrap();
        assert_eq!(json, serde_json::json!({"likes": 3, "isLiked": true}));
    }
}
