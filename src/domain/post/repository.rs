// src/domain/post/repository.rs
use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::locale::Locale;
use crate::domain::post::entity::{NewPost, Post, PostUpdate};
use crate::domain::post::query::PostQuery;
use crate::domain::post::value_objects::PostId;
use async_trait::async_trait;

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Inserts the base row, every buffered translation and the
    /// categorizations in one transaction.
    async fn insert(&self, post: NewPost) -> DomainResult<PostId>;
    async fn update(&self, update: PostUpdate) -> DomainResult<()>;
    /// Removes the post together with its translations, comments and
    /// categorizations. Categories are untouched.
    async fn delete(&self, id: PostId) -> DomainResult<()>;
    async fn increment_access_count(&self, id: PostId) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    /// Loads the post with its `locale` translation attached when present.
    async fn find_by_id(&self, id: PostId, locale: &Locale) -> DomainResult<Option<Post>>;
    async fn find(&self, query: &PostQuery) -> DomainResult<Vec<Post>>;
    async fn count(&self, query: &PostQuery) -> DomainResult<u64>;
    async fn category_ids(&self, id: PostId) -> DomainResult<Vec<CategoryId>>;
}
