// src/domain/category/repository.rs
use crate::domain::category::entity::{Category, CategoryUpdate, NewCategory};
use crate::domain::category::value_objects::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::locale::Locale;
use crate::domain::post::PostId;
use crate::domain::slug::Slug;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryWriteRepository: Send + Sync {
    async fn insert(&self, category: NewCategory) -> DomainResult<CategoryId>;
    async fn update(&self, update: CategoryUpdate) -> DomainResult<()>;
    /// Removes the category and its categorizations; posts are kept.
    async fn delete(&self, id: CategoryId) -> DomainResult<()>;
}

#[async_trait]
pub trait CategoryReadRepository: Send + Sync {
    async fn find_by_id(&self, id: CategoryId, locale: &Locale) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &Slug, locale: &Locale) -> DomainResult<Option<Category>>;
    /// All categories ordered by id; with `translated_only`, only those with
    /// a row for `locale`.
    async fn list(&self, locale: &Locale, translated_only: bool) -> DomainResult<Vec<Category>>;
    async fn list_for_post(&self, post_id: PostId, locale: &Locale) -> DomainResult<Vec<Category>>;
}
