// src/application/commands/categories/service.rs
use std::sync::Arc;

use crate::{
    application::ports::{locale::LocaleContext, time::Clock},
    domain::{
        category::{
            CategoryReadRepository, CategorySlugService, CategoryTranslation,
            CategoryWriteRepository,
        },
        translation::TranslationStore,
    },
};

pub struct CategoryCommandService {
    pub(super) write_repo: Arc<dyn CategoryWriteRepository>,
    pub(super) read_repo: Arc<dyn CategoryReadRepository>,
    pub(super) translations: Arc<dyn TranslationStore<CategoryTranslation>>,
    pub(super) slug_service: Arc<CategorySlugService>,
    pub(super) locales: Arc<dyn LocaleContext>,
    pub(super) clock: Arc<dyn Clock>,
}

impl CategoryCommandService {
    pub fn new(
        write_repo: Arc<dyn CategoryWriteRepository>,
        read_repo: Arc<dyn CategoryReadRepository>,
        translations: Arc<dyn TranslationStore<CategoryTranslation>>,
        slug_service: Arc<CategorySlugService>,
        locales: Arc<dyn LocaleContext>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            translations,
            slug_service,
            locales,
            clock,
        }
    }
}
