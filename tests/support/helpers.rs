use super::mocks::{FixedClock, StubLinks};
use blog_core::application::{
    ApplicationError,
    commands::posts::CreatePostCommand,
    dto::{CategoryDto, PostDto},
    ports::identity::AuthorDirectory,
    services::{ApplicationServices, ServiceDependencies, ServiceOptions},
};
use blog_core::domain::locale::Locale;
use blog_core::infrastructure::{
    locale::FixedLocaleContext,
    memory::{InMemoryAuthorDirectory, InMemoryBlogStore},
    util::DefaultSlugGenerator,
};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use std::sync::Arc;

pub fn en() -> Locale {
    Locale::new("en").unwrap()
}

pub fn fr() -> Locale {
    Locale::new("fr").unwrap()
}

pub fn de() -> Locale {
    Locale::new("de").unwrap()
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

static TEST_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| at(2024, 6, 1));

/// The instant every test app starts at.
pub fn test_now() -> DateTime<Utc> {
    *TEST_NOW
}

#[derive(Debug, Clone)]
pub struct TestAppOptions {
    pub authors_enabled: bool,
    pub validate_source_url: bool,
    pub per_page: u32,
}

impl Default for TestAppOptions {
    fn default() -> Self {
        Self {
            authors_enabled: false,
            validate_source_url: false,
            per_page: 10,
        }
    }
}

/// Services wired to the in-memory backend with controllable clock and link
/// validator.
pub struct TestApp {
    pub services: ApplicationServices,
    pub store: Arc<InMemoryBlogStore>,
    pub authors: Arc<InMemoryAuthorDirectory>,
    pub clock: Arc<FixedClock>,
    pub links: Arc<StubLinks>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(TestAppOptions::default())
    }

    pub fn with_options(options: TestAppOptions) -> Self {
        let store = Arc::new(InMemoryBlogStore::new());
        let authors = Arc::new(InMemoryAuthorDirectory::new());
        let clock = Arc::new(FixedClock::new(test_now()));
        let links = Arc::new(StubLinks::default());

        let directory: Option<Arc<dyn AuthorDirectory>> = if options.authors_enabled {
            Some(authors.clone())
        } else {
            None
        };
        let deps = ServiceDependencies {
            post_write_repo: store.clone(),
            post_read_repo: store.clone(),
            post_translations: store.clone(),
            category_write_repo: store.clone(),
            category_read_repo: store.clone(),
            category_translations: store.clone(),
            comment_repo: store.clone(),
            settings_store: store.clone(),
            authors: directory,
            link_validator: links.clone(),
            locales: Arc::new(FixedLocaleContext::new(en())),
            clock: clock.clone(),
            slugger: Arc::new(DefaultSlugGenerator),
        };
        let services = ApplicationServices::new(
            deps,
            ServiceOptions {
                validate_source_url: options.validate_source_url,
                settings_scope: "blog".into(),
                default_per_page: options.per_page,
            },
        );

        Self {
            services,
            store,
            authors,
            clock,
            links,
        }
    }

    pub async fn create_post(&self, command: CreatePostCommand) -> PostDto {
        self.services
            .post_commands
            .create_post(command)
            .await
            .expect("post should be created")
    }

    pub async fn create_category(&self, title: &str) -> CategoryDto {
        use blog_core::application::commands::categories::{
            CategoryTranslationInput, CreateCategoryCommand,
        };
        self.services
            .category_commands
            .create_category(CreateCategoryCommand {
                translations: vec![CategoryTranslationInput::new("en", title)],
            })
            .await
            .expect("category should be created")
    }
}

/// Fields that failed validation, in the order they were reported.
pub fn failed_fields(err: &ApplicationError) -> Vec<String> {
    err.validation_errors()
        .map(|errors| errors.errors().iter().map(|e| e.field.clone()).collect())
        .unwrap_or_default()
}

/// Whether `err` reports a missing record, from either layer.
pub fn is_not_found(err: &ApplicationError) -> bool {
    use blog_core::domain::errors::DomainError;
    matches!(
        err,
        ApplicationError::NotFound(_) | ApplicationError::Domain(DomainError::NotFound(_))
    )
}
