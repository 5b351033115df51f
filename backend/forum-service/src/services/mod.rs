/// Business logic layer for forum-service
///
/// This module provides high-level operations:
/// - Post service: listing, creation, deletion and likes
/// - Comment service: listing, creation and likes
pub mod comments;
pub mod posts;

// Re-export commonly used services
pub use comments::CommentService;
pub use posts::PostService;

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Parse a path or body identifier, failing with `message` as a 400
pub fn parse_id(raw: &str, message: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(message.to_string()))
}

/// Caller identity required by like operations
pub(crate) fn require_user_id(user_id: Option<&str>) -> Result<&str> {
    user_id.ok_or_else(|| AppError::BadRequest("userId is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Invalid post ID").unwrap(), id);

        let err = parse_id("not-an-id", "Invalid post ID").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid post ID"));
    }

    #[test]
    fn test_require_user_id() {
        assert_eq!(require_user_id(Some("u-1")).unwrap(), "u-1");
        assert!(matches!(
            require_user_id(None),
            Err(AppError::BadRequest(ref msg)) if msg == "userId is required"
        ));
    }
}
