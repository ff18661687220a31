use crate::application::{ApplicationResult, ports::identity::AuthorDirectory};
use crate::domain::user::{AuthorIdentity, UserId, Username};
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

/// Reads authors from the `users` table owned by the identity system.
#[derive(Clone)]
pub struct PostgresAuthorDirectory {
    pool: PgPool,
}

impl PostgresAuthorDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
}

#[async_trait]
impl AuthorDirectory for PostgresAuthorDirectory {
    async fn find_author(&self, id: UserId) -> ApplicationResult<Option<AuthorIdentity>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, username FROM users WHERE id = $1")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(AuthorIdentity {
            id: UserId::new(row.id)?,
            username: Username::new(row.username)?,
        }))
    }
}
