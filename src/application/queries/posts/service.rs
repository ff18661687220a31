// src/application/queries/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{pagination::page_offset, Page, PostDto},
        error::ApplicationResult,
        ports::time::Clock,
        services::{facade::ContentFacade, settings::BlogSettingsService},
    },
    domain::{
        post::{Post, PostQuery, PostReadRepository, PostTranslation},
        translation::TranslationStore,
    },
};

/// Who a read is for. Public reads only ever see live posts; admin reads
/// bypass the publish filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Public,
    Admin,
}

pub struct PostQueryService {
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) translations: Arc<dyn TranslationStore<PostTranslation>>,
    pub(super) settings: Arc<BlogSettingsService>,
    pub(super) facade: Arc<ContentFacade>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostQueryService {
    pub fn new(
        read_repo: Arc<dyn PostReadRepository>,
        translations: Arc<dyn TranslationStore<PostTranslation>>,
        settings: Arc<BlogSettingsService>,
        facade: Arc<ContentFacade>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            read_repo,
            translations,
            settings,
            facade,
            clock,
        }
    }

    pub(super) fn visible(&self, post: &Post, audience: Audience) -> bool {
        audience == Audience::Admin || post.is_live(self.clock.now())
    }

    pub(super) async fn first(&self, query: PostQuery) -> ApplicationResult<Option<PostDto>> {
        match self.read_repo.find(&query.limit(1)).await?.into_iter().next() {
            Some(post) => Ok(Some(self.facade.post_view(post).await?)),
            None => Ok(None),
        }
    }

    pub(super) async fn all(&self, query: PostQuery) -> ApplicationResult<Vec<PostDto>> {
        let posts = self.read_repo.find(&query).await?;
        self.facade.post_views(posts).await
    }

    /// Runs `query` as page `page` using the configured page size.
    pub(super) async fn paged(&self, query: PostQuery, page: u32) -> ApplicationResult<Page<PostDto>> {
        let per_page = self.settings.posts_per_page();
        let page = page.max(1);
        let total = self.read_repo.count(&query.unpaged()).await?;
        let posts = self
            .read_repo
            .find(&query.limit(per_page).offset(page_offset(page, per_page)))
            .await?;
        let items = self.facade.post_views(posts).await?;
        Ok(Page::new(items, page, per_page, total))
    }
}
