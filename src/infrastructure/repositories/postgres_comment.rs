// src/infrastructure/repositories/postgres_comment.rs
use super::map_sqlx;
use crate::domain::comment::{Comment, CommentId, CommentRepository, NewComment, missing_post};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::PostId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    blog_post_id: i64,
    name: String,
    email: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = DomainError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Comment {
            id: CommentId(row.id),
            blog_post_id: PostId::new(row.blog_post_id)?,
            name: row.name,
            email: row.email,
            body: row.body,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        let post_id = comment.blog_post_id;
        let row = sqlx::query_as::<_, CommentRow>(
            "INSERT INTO blog_comments (blog_post_id, name, email, body, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, blog_post_id, name, email, body, created_at",
        )
        .bind(i64::from(post_id))
        .bind(comment.name)
        .bind(comment.email)
        .bind(comment.body)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match map_sqlx(err) {
            DomainError::NotFound(_) => missing_post(post_id),
            other => other,
        })?;

        Comment::try_from(row)
    }

    async fn list_for_post(&self, post_id: PostId) -> DomainResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            "SELECT id, blog_post_id, name, email, body, created_at
             FROM blog_comments WHERE blog_post_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(i64::from(post_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn count_for_post(&self, post_id: PostId) -> DomainResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_comments WHERE blog_post_id = $1")
                .bind(i64::from(post_id))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx)?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
