use serde::Deserialize;

/// Body of `POST /posts`.
///
/// Missing fields default to empty values and are rejected by validation
/// rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub is_anonymous: bool,
    pub tags: Vec<String>,
}

/// Body of `POST /comments`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub content: String,
    pub author: String,
    pub post_id: String,
    pub is_anonymous: bool,
}

/// Body carrying the caller identity for likes and deletes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: Option<String>,
}

impl UserIdRequest {
    /// The caller identity, if one was supplied and is not blank
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_request_defaults() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"Hello there","isAnonymous":true}"#).unwrap();
        assert_eq!(req.title, "Hello there");
        assert!(req.is_anonymous);
        assert!(req.content.is_empty());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_blank_user_id_is_absent() {
        let req: UserIdRequest = serde_json::from_str(r#"{"userId":"  "}"#).unwrap();
        assert_eq!(req.user_id(), None);

        let req: UserIdRequest = serde_json::from_str(r#"{"userId":"u-1"}"#).unwrap();
        assert_eq!(req.user_id(), Some("u-1"));

        let req: UserIdRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id(), None);
    }
}
