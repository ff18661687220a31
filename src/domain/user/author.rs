// src/domain/user/author.rs
use crate::domain::user::value_objects::{UserId, Username};

/// Identity returned by the author directory. Read-only from the blog's
/// point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorIdentity {
    pub id: UserId,
    pub username: Username,
}

/// Who wrote a post: an attached identity when the identity system knows the
/// user, otherwise the plain username stored on the post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Author {
    Attached(AuthorIdentity),
    Fallback(Option<Username>),
}

impl Author {
    pub fn resolve(identity: Option<AuthorIdentity>, username: Option<Username>) -> Self {
        match identity {
            Some(identity) => Author::Attached(identity),
            None => Author::Fallback(username),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Author::Attached(identity) => Some(identity.username.as_str()),
            Author::Fallback(username) => username.as_ref().map(Username::as_str),
        }
    }

    pub fn identity(&self) -> Option<&AuthorIdentity> {
        match self {
            Author::Attached(identity) => Some(identity),
            Author::Fallback(_) => None,
        }
    }
}
