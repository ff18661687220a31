// src/domain/comment.rs
//! Reader comments attached to a post. Only storage lives here; moderation
//! is handled elsewhere.
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::PostId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub i64);

impl From<CommentId> for i64 {
    fn from(value: CommentId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub blog_post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub blog_post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(
        blog_post_id: PostId,
        name: impl Into<String>,
        email: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        let body = body.into();
        let mut errors = crate::domain::errors::ValidationErrors::new();
        if name.is_empty() {
            errors.add("name", "can't be blank");
        }
        if !email.contains('@') {
            errors.add("email", "is invalid");
        }
        if body.trim().is_empty() {
            errors.add("body", "can't be blank");
        }
        errors.into_result()?;
        Ok(Self {
            blog_post_id,
            name,
            email,
            body,
            created_at,
        })
    }
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Fails with `NotFound` when the post does not exist.
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment>;
    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<Comment>>;
    async fn count_for_post(&self, post_id: PostId) -> DomainResult<u64>;
}

pub(crate) fn missing_post(post_id: PostId) -> DomainError {
    DomainError::NotFound(format!("post {post_id} not found"))
}
