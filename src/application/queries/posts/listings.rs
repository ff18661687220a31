// src/application/queries/posts/listings.rs
use super::PostQueryService;
use crate::{
    application::{
        dto::{Page, PostDto},
        error::ApplicationResult,
    },
    domain::{
        category::CategoryId,
        locale::Locale,
        post::{PostOrder, PostQuery, Tag},
        taxonomy,
    },
};

impl PostQueryService {
    /// Live posts without any category, newest first.
    pub async fn uncategorized(&self, locale: &Locale) -> ApplicationResult<Vec<PostDto>> {
        self.all(taxonomy::uncategorized_query(self.clock.now(), locale.clone()))
            .await
    }

    pub async fn list_live(&self, page: u32, locale: &Locale) -> ApplicationResult<Page<PostDto>> {
        let query = PostQuery::new(locale.clone())
            .live(self.clock.now())
            .order(PostOrder::NewestFirst);
        self.paged(query, page).await
    }

    /// Every post including drafts and scheduled ones; posts lacking a
    /// translation for `locale` are listed without translated fields.
    pub async fn list_all(&self, page: u32, locale: &Locale) -> ApplicationResult<Page<PostDto>> {
        self.paged(PostQuery::new(locale.clone()), page).await
    }

    pub async fn in_category(
        &self,
        category_id: i64,
        page: u32,
        locale: &Locale,
    ) -> ApplicationResult<Page<PostDto>> {
        let category = CategoryId::new(category_id)?;
        let query = taxonomy::category_posts_query(category, self.clock.now(), locale.clone());
        self.paged(query, page).await
    }

    pub async fn tagged(
        &self,
        tag: &str,
        page: u32,
        locale: &Locale,
    ) -> ApplicationResult<Page<PostDto>> {
        let tag = Tag::new(tag)?;
        self.paged(taxonomy::tagged_query(tag, self.clock.now(), locale.clone()), page)
            .await
    }
}
