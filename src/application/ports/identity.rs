// src/application/ports/identity.rs
use crate::application::ApplicationResult;
use crate::domain::user::{AuthorIdentity, UserId};
use async_trait::async_trait;

/// Read-only view of the identity system that owns user accounts.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    async fn find_author(&self, id: UserId) -> ApplicationResult<Option<AuthorIdentity>>;
}
