// src/application/services/mod.rs
pub mod facade;
pub mod settings;

use std::sync::Arc;

use crate::{
    application::{
        commands::{
            categories::CategoryCommandService, comments::CommentCommandService,
            posts::PostCommandService,
        },
        ports::{
            identity::AuthorDirectory, links::RedirectValidator, locale::LocaleContext,
            settings::SettingsStore, time::Clock, util::SlugGenerator,
        },
        queries::{
            categories::CategoryQueryService, comments::CommentQueryService,
            posts::PostQueryService,
        },
    },
    domain::{
        category::{
            CategoryReadRepository, CategorySlugService, CategoryTranslation,
            CategoryWriteRepository,
        },
        comment::CommentRepository,
        locale::Locale,
        post::{
            PostReadRepository, PostRules, PostSlugService, PostTranslation, PostWriteRepository,
        },
        translation::TranslationStore,
    },
};

use facade::ContentFacade;
use settings::BlogSettingsService;

/// Storage adapters and collaborators the services are built from.
pub struct ServiceDependencies {
    pub post_write_repo: Arc<dyn PostWriteRepository>,
    pub post_read_repo: Arc<dyn PostReadRepository>,
    pub post_translations: Arc<dyn TranslationStore<PostTranslation>>,
    pub category_write_repo: Arc<dyn CategoryWriteRepository>,
    pub category_read_repo: Arc<dyn CategoryReadRepository>,
    pub category_translations: Arc<dyn TranslationStore<CategoryTranslation>>,
    pub comment_repo: Arc<dyn CommentRepository>,
    pub settings_store: Arc<dyn SettingsStore>,
    /// `None` when no identity system is configured.
    pub authors: Option<Arc<dyn AuthorDirectory>>,
    pub link_validator: Arc<dyn RedirectValidator>,
    pub locales: Arc<dyn LocaleContext>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
}

#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub validate_source_url: bool,
    pub settings_scope: String,
    pub default_per_page: u32,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            validate_source_url: false,
            settings_scope: "blog".to_string(),
            default_per_page: 10,
        }
    }
}

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub category_commands: Arc<CategoryCommandService>,
    pub category_queries: Arc<CategoryQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    pub settings: Arc<BlogSettingsService>,
    locales: Arc<dyn LocaleContext>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies, options: ServiceOptions) -> Self {
        let rules = PostRules {
            author_required: deps.authors.is_some(),
            validate_source_url: options.validate_source_url,
        };

        let facade = Arc::new(ContentFacade::new(
            deps.authors.clone(),
            Arc::clone(&deps.clock),
        ));
        let settings = Arc::new(BlogSettingsService::new(
            Arc::clone(&deps.settings_store),
            options.settings_scope,
            options.default_per_page,
        ));

        let post_slugs = Arc::new(PostSlugService::new(
            Arc::clone(&deps.post_translations),
            Arc::clone(&deps.slugger),
            "post",
        ));
        let category_slugs = Arc::new(CategorySlugService::new(
            Arc::clone(&deps.category_translations),
            Arc::clone(&deps.slugger),
            "category",
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&deps.post_write_repo),
            Arc::clone(&deps.post_read_repo),
            Arc::clone(&deps.post_translations),
            Arc::clone(&deps.category_read_repo),
            post_slugs,
            deps.authors.clone(),
            Arc::clone(&deps.link_validator),
            Arc::clone(&deps.locales),
            Arc::clone(&facade),
            rules,
            Arc::clone(&deps.clock),
        ));
        let post_queries = Arc::new(PostQueryService::new(
            Arc::clone(&deps.post_read_repo),
            Arc::clone(&deps.post_translations),
            Arc::clone(&settings),
            Arc::clone(&facade),
            Arc::clone(&deps.clock),
        ));

        let category_commands = Arc::new(CategoryCommandService::new(
            Arc::clone(&deps.category_write_repo),
            Arc::clone(&deps.category_read_repo),
            Arc::clone(&deps.category_translations),
            category_slugs,
            Arc::clone(&deps.locales),
            Arc::clone(&deps.clock),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(
            Arc::clone(&deps.category_read_repo),
            Arc::clone(&deps.category_translations),
            Arc::clone(&deps.post_read_repo),
            Arc::clone(&deps.clock),
        ));

        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&deps.comment_repo),
            Arc::clone(&settings),
            Arc::clone(&deps.clock),
        ));
        let comment_queries = Arc::new(CommentQueryService::new(Arc::clone(&deps.comment_repo)));

        Self {
            post_commands,
            post_queries,
            category_commands,
            category_queries,
            comment_commands,
            comment_queries,
            settings,
            locales: deps.locales,
        }
    }

    /// The caller's ambient locale, to be passed into each query.
    pub fn current_locale(&self) -> Locale {
        self.locales.current()
    }

    pub fn default_locale(&self) -> Locale {
        self.locales.default_locale()
    }
}
