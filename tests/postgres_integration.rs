mod support;

use blog_core::application::commands::categories::{
    CategoryTranslationInput, CreateCategoryCommand, DeleteCategoryCommand,
};
use blog_core::application::commands::comments::AddCommentCommand;
use blog_core::application::commands::posts::{
    DeletePostCommand, PostTranslationInput, UpdatePostCommand,
};
use blog_core::application::queries::posts::Audience;
use blog_core::application::services::{
    ApplicationServices, ServiceDependencies, ServiceOptions,
};
use blog_core::domain::category::CategoryTranslation;
use blog_core::domain::post::PostTranslation;
use blog_core::infrastructure::locale::FixedLocaleContext;
use blog_core::infrastructure::repositories::{
    CATEGORY_TRANSLATIONS, POST_TRANSLATIONS, PostgresCategoryReadRepository,
    PostgresCategoryWriteRepository, PostgresCommentRepository, PostgresPostReadRepository,
    PostgresPostWriteRepository, PostgresTranslationStore,
};
use blog_core::infrastructure::settings::PostgresSettingsStore;
use blog_core::infrastructure::util::DefaultSlugGenerator;
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use support::{FixedClock, StubLinks, at, en, fr, post_at, test_now, translation};

fn postgres_services(pool: &PgPool) -> ApplicationServices {
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
        authors: None,
        link_validator: Arc::new(StubLinks::default()),
        locales: Arc::new(FixedLocaleContext::new(en())),
        clock: Arc::new(FixedClock::new(test_now())),
        slugger: Arc::new(DefaultSlugGenerator),
    };
    ApplicationServices::new(
        deps,
        ServiceOptions {
            validate_source_url: false,
            settings_scope: "blog-integration".into(),
            default_per_page: 10,
        },
    )
}

async fn rows_for_post(pool: &PgPool, table: &str, post_id: i64) -> i64 {
    sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {table} WHERE blog_post_id = $1"
    ))
    .bind(post_id)
    .fetch_one(pool)
    .await
    .expect("count rows")
}

#[tokio::test]
async fn postgres_backend_round_trip() {
    // Run only when explicitly enabled to avoid requiring Postgres in all environments
    if std::env::var("RUN_DB_INTEGRATION").unwrap_or_default() != "1" {
        eprintln!("skipping integration test: set RUN_DB_INTEGRATION=1 and DATABASE_URL to run");
        return;
    }

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");
    let pool = blog_core::infrastructure::database::init_pool(&database_url)
        .await
        .expect("init pool");
    blog_core::infrastructure::database::run_migrations(&pool)
        .await
        .expect("run migrations");

    let services = postgres_services(&pool);
    let suffix = chrono::Utc::now().timestamp_micros();
    // one-second gaps at a run-specific instant keep other rows out of next/previous
    let base = at(1999, 1, 1) + Duration::seconds(suffix % 10_000_000);

    let category = services
        .category_commands
        .create_category(CreateCategoryCommand {
            translations: vec![CategoryTranslationInput::new("en", format!("Pg News {suffix}"))],
        })
        .await
        .expect("create category");

    let first = services
        .post_commands
        .create_post(
            post_at(&format!("Pg Alpha {suffix}"), base)
                .category(category.id)
                .build(),
        )
        .await
        .expect("create first");
    let second = services
        .post_commands
        .create_post(
            post_at(&format!("Pg Beta {suffix}"), base + Duration::seconds(1))
                .translation(translation("fr", &format!("Pg Bêta {suffix}"), "Corps"))
                .category(category.id)
                .build(),
        )
        .await
        .expect("create second");
    assert_eq!(first.slug, Some(format!("pg-alpha-{suffix}")));

    // translate the first post after creation
    services
        .post_commands
        .update_post(UpdatePostCommand {
            id: first.id,
            translations: vec![
                PostTranslationInput::new("fr")
                    .title(format!("Pg Alpha FR {suffix}"))
                    .body("Corps"),
            ],
            ..UpdatePostCommand::default()
        })
        .await
        .expect("translate first");

    let queries = &services.post_queries;
    let by_slug = queries
        .by_slug(&format!("pg-alpha-fr-{suffix}"), &fr(), Audience::Public)
        .await
        .expect("slug lookup")
        .expect("french slug resolves");
    assert_eq!(by_slug.id, first.id);
    assert!(
        queries
            .by_slug(&format!("pg-alpha-fr-{suffix}"), &en(), Audience::Public)
            .await
            .expect("slug lookup")
            .is_none()
    );

    let next = queries.next(first.id, &en()).await.expect("next");
    assert_eq!(next.map(|p| p.id), Some(second.id));
    let previous = queries.previous(second.id, &fr()).await.expect("previous");
    assert_eq!(previous.map(|p| p.id), Some(first.id));

    let categories = &services.category_queries;
    assert_eq!(categories.post_count(category.id, &en()).await.expect("count"), 2);
    assert_eq!(categories.post_count(category.id, &fr()).await.expect("count"), 2);

    services
        .comment_commands
        .add_comment(AddCommentCommand {
            post_id: second.id,
            name: "Reader".into(),
            email: "reader@example.com".into(),
            body: "Nice".into(),
        })
        .await
        .expect("add comment");

    // deleting a post removes its translations, categorizations and comments
    services
        .post_commands
        .delete_post(DeletePostCommand { id: second.id })
        .await
        .expect("delete second");
    for table in ["blog_post_translations", "blog_categorizations", "blog_comments"] {
        assert_eq!(rows_for_post(&pool, table, second.id).await, 0, "{table} left behind");
    }
    assert_eq!(categories.post_count(category.id, &en()).await.expect("count"), 1);

    // cleanup test rows
    services
        .post_commands
        .delete_post(DeletePostCommand { id: first.id })
        .await
        .expect("delete first");
    services
        .category_commands
        .delete_category(DeleteCategoryCommand { id: category.id })
        .await
        .expect("delete category");
    sqlx::query("DELETE FROM settings WHERE scope = 'blog-integration'")
        .execute(&pool)
        .await
        .expect("cleanup");
}
