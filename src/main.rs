use anyhow::{Context, Result, bail};
use blog_core::application::{
    ports::{
        identity::AuthorDirectory, links::RedirectValidator, locale::LocaleContext, time::Clock,
        util::SlugGenerator,
    },
    services::{ApplicationServices, ServiceDependencies, ServiceOptions},
};
use blog_core::config::{AppConfig, StorageBackend};
use blog_core::domain::{category::CategoryTranslation, post::PostTranslation};
use blog_core::infrastructure::{
    database,
    identity::PostgresAuthorDirectory,
    links::{AcceptAllLinks, HttpRedirectValidator},
    locale::FixedLocaleContext,
    memory::{InMemoryAuthorDirectory, InMemoryBlogStore},
    repositories::{
        CATEGORY_TRANSLATIONS, POST_TRANSLATIONS, PostgresCategoryReadRepository,
        PostgresCategoryWriteRepository, PostgresCommentRepository, PostgresPostReadRepository,
        PostgresPostWriteRepository, PostgresTranslationStore,
    },
    settings::PostgresSettingsStore,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: blog_core <migrate | recent [COUNT] | settings | toggle-teasers>";

enum Command {
    Migrate,
    Recent(u32),
    Settings,
    ToggleTeasers,
}

fn parse_command(args: &[String]) -> Result<Command> {
    match args.first().map(String::as_str) {
        Some("migrate") => Ok(Command::Migrate),
        Some("recent") => {
            let count = match args.get(1) {
                Some(raw) => raw.parse().with_context(|| format!("invalid count '{raw}'"))?,
                None => 5,
            };
            Ok(Command::Recent(count))
        }
        Some("settings") => Ok(Command::Settings),
        Some("toggle-teasers") => Ok(Command::ToggleTeasers),
        _ => bail!(USAGE),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_command(&args)?;
    let config = AppConfig::from_env()?;

    let (services, pool) = build_services(&config).await?;

    match command {
        Command::Migrate => match pool {
            Some(pool) => {
                database::run_migrations(&pool).await?;
                tracing::info!("migrations applied");
            }
            None => tracing::info!("in-memory storage has no migrations"),
        },
        Command::Recent(count) => {
            let locale = services.current_locale();
            for post in services.post_queries.recent(count, &locale).await? {
                println!("{}", serde_json::to_string(&post)?);
            }
        }
        Command::Settings => {
            let snapshot = services.settings.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::ToggleTeasers => {
            let enabled = services.settings.toggle_teasers().await?;
            println!("teasers_enabled = {enabled}");
        }
    }

    Ok(())
}

async fn build_services(
    config: &AppConfig,
) -> Result<(ApplicationServices, Option<sqlx::PgPool>)> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let locales: Arc<dyn LocaleContext> =
        Arc::new(FixedLocaleContext::new(config.default_locale().clone()));
    let link_validator: Arc<dyn RedirectValidator> = if config.validate_source_url() {
        Arc::new(HttpRedirectValidator::new(config.source_url_timeout())?)
    } else {
        Arc::new(AcceptAllLinks)
    };
    let options = ServiceOptions {
        validate_source_url: config.validate_source_url(),
        settings_scope: config.settings_scope().to_string(),
        default_per_page: config.posts_per_page(),
    };

    match config.storage() {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage");
            let store = Arc::new(InMemoryBlogStore::new());
            let authors: Option<Arc<dyn AuthorDirectory>> = if config.authors_enabled() {
                Some(Arc::new(InMemoryAuthorDirectory::new()))
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
                settings_store: store,
                authors,
                link_validator,
                locales,
                clock,
                slugger,
            };
            Ok((ApplicationServices::new(deps, options), None))
        }
        StorageBackend::Postgres(url) => {
            let pool = database::init_pool(&url)
                .await
                .context("failed to connect to the database")?;
            let authors: Option<Arc<dyn AuthorDirectory>> = if config.authors_enabled() {
                Some(Arc::new(PostgresAuthorDirectory::new(pool.clone())))
            } else {
                None
            };
            let deps = ServiceDependencies {
                post_write_repo: Arc::new(PostgresPostWriteRepository::new(pool.clone())),
                post_read_repo: Arc::new(PostgresPostReadRepository::new(pool.clone())),
                post_translations: Arc::new(PostgresTranslationStore::<PostTranslation>::new(
                    pool.clone(),
                    POST_TRANSLATIONS,
                )),
                category_write_repo: Arc::new(PostgresCategoryWriteRepository::new(pool.clone())),
                category_read_repo: Arc::new(PostgresCategoryReadRepository::new(pool.clone())),
                category_translations: Arc::new(PostgresTranslationStore::<CategoryTranslation>::new(
                    pool.clone(),
                    CATEGORY_TRANSLATIONS,
                )),
                comment_repo: Arc::new(PostgresCommentRepository::new(pool.clone())),
                settings_store: Arc::new(PostgresSettingsStore::new(pool.clone())),
                authors,
                link_validator,
                locales,
                clock,
                slugger,
            };
            Ok((ApplicationServices::new(deps, options), Some(pool)))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
