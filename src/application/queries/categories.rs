// src/application/queries/categories.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        category::{CategoryId, CategoryReadRepository, CategoryTranslation},
        locale::Locale,
        post::{PostId, PostReadRepository},
        slug::Slug,
        taxonomy,
        translation::TranslationStore,
    },
};

pub struct CategoryQueryService {
    read_repo: Arc<dyn CategoryReadRepository>,
    translations: Arc<dyn TranslationStore<CategoryTranslation>>,
    posts: Arc<dyn PostReadRepository>,
    clock: Arc<dyn Clock>,
}

impl CategoryQueryService {
    pub fn new(
        read_repo: Arc<dyn CategoryReadRepository>,
        translations: Arc<dyn TranslationStore<CategoryTranslation>>,
        posts: Arc<dyn PostReadRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            translations,
            posts,
            clock,
        }
    }

    pub async fn by_slug(&self, slug: &str, locale: &Locale) -> ApplicationResult<Option<CategoryDto>> {
        // A malformed slug cannot name anything.
        let Ok(slug) = Slug::new(slug) else {
            return Ok(None);
        };
        let category = self.read_repo.find_by_slug(&slug, locale).await?;
        Ok(category.map(CategoryDto::from))
    }

    pub async fn by_title(&self, title: &str, locale: &Locale) -> ApplicationResult<Option<CategoryDto>> {
        let ids = self
            .translations
            .ids_by_translated_field("title", title, None)
            .await?;
        let Some(id) = ids.into_iter().next() else {
            return Ok(None);
        };
        let category = self
            .read_repo
            .find_by_id(CategoryId::new(id)?, locale)
            .await?;
        Ok(category.map(CategoryDto::from))
    }

    pub async fn by_id(&self, id: i64, locale: &Locale) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(id)?;
        self.read_repo
            .find_by_id(id, locale)
            .await?
            .map(CategoryDto::from)
            .ok_or_else(|| ApplicationError::not_found("category not found"))
    }

    /// Every category; those without a row for `locale` carry no title.
    pub async fn list(&self, locale: &Locale) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.read_repo.list(locale, false).await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    /// Only categories translated into `locale`.
    pub async fn translated(&self, locale: &Locale) -> ApplicationResult<Vec<CategoryDto>> {
        let categories = self.read_repo.list(locale, true).await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    /// Live posts of the category that have a translation in `locale`.
    pub async fn post_count(&self, category_id: i64, locale: &Locale) -> ApplicationResult<u64> {
        let category = CategoryId::new(category_id)?;
        let query = taxonomy::category_posts_query(category, self.clock.now(), locale.clone());
        Ok(self.posts.count(&query).await?)
    }

    pub async fn categories_of(&self, post_id: i64, locale: &Locale) -> ApplicationResult<Vec<CategoryDto>> {
        let post_id = PostId::new(post_id)?;
        let categories = self.read_repo.list_for_post(post_id, locale).await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }
}
