/// Stored author name for anonymous posts and comments
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Avatar initials for anonymous posts and comments
pub const ANONYMOUS_AVATAR: &str = "AN";

/// Author name and avatar initials as they are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship {
    pub author: String,
    pub avatar: String,
}

impl Authorship {
    /// Anonymous submissions discard the supplied name entirely.
    /// Otherwise the avatar is the first two characters of the trimmed
    /// author, upper-cased.
    pub fn derive(author: &str, is_anonymous: bool) -> Self {
        if is_anonymous {
            return Self {
                author: ANONYMOUS_AUTHOR.to_string(),
                avatar: ANONYMOUS_AVATAR.to_string(),
            };
        }

        let author = author.trim();
        let avatar = author.chars().take(2).collect::<String>().to_uppercase();

        Self {
            author: author.to_string(),
            avatar,
        }
    }

    pub fn is_anonymous_author(author: &str) -> bool {
        author == ANONYMOUS_AUTHOR
    }
}
