// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        ports::{
            identity::AuthorDirectory, links::RedirectValidator, locale::LocaleContext,
            time::Clock,
        },
        services::facade::ContentFacade,
    },
    domain::{
        category::CategoryReadRepository,
        post::{
            PostReadRepository, PostRules, PostSlugService, PostTranslation, PostWriteRepository,
        },
        translation::TranslationStore,
    },
};

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) translations: Arc<dyn TranslationStore<PostTranslation>>,
    pub(super) categories: Arc<dyn CategoryReadRepository>,
    pub(super) slug_service: Arc<PostSlugService>,
    pub(super) authors: Option<Arc<dyn AuthorDirectory>>,
    pub(super) links: Arc<dyn RedirectValidator>,
    pub(super) locales: Arc<dyn LocaleContext>,
    pub(super) facade: Arc<ContentFacade>,
    pub(super) rules: PostRules,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        translations: Arc<dyn TranslationStore<PostTranslation>>,
        categories: Arc<dyn CategoryReadRepository>,
        slug_service: Arc<PostSlugService>,
        authors: Option<Arc<dyn AuthorDirectory>>,
        links: Arc<dyn RedirectValidator>,
        locales: Arc<dyn LocaleContext>,
        facade: Arc<ContentFacade>,
        rules: PostRules,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            translations,
            categories,
            slug_service,
            authors,
            links,
            locales,
            facade,
            rules,
            clock,
        }
    }
}
