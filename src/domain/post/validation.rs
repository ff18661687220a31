// src/domain/post/validation.rs
use crate::domain::errors::ValidationErrors;
use crate::domain::user::{AuthorIdentity, Username};
use chrono::{DateTime, Utc};

/// Rules that depend on deployment configuration rather than on the post.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostRules {
    /// An identity system is configured, so posts need an attached author
    /// instead of a plain username.
    pub author_required: bool,
    /// Source URLs are checked for reachability on save.
    pub validate_source_url: bool,
}

pub fn require_published_at(
    published_at: Option<DateTime<Utc>>,
    errors: &mut ValidationErrors,
) -> Option<DateTime<Utc>> {
    if published_at.is_none() {
        errors.add("published_at", "can't be blank");
    }
    published_at
}

/// Exactly one of the two author representations is demanded, depending on
/// whether an author identity system is configured.
pub fn validate_author(
    rules: PostRules,
    author: Option<&AuthorIdentity>,
    username: Option<&Username>,
    errors: &mut ValidationErrors,
) {
    if rules.author_required {
        if author.is_none() {
            errors.add("author", "can't be blank");
        }
    } else if username.is_none() {
        errors.add("username", "can't be blank");
    }
}
