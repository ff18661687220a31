mod support;

use blog_core::application::commands::posts::PostTranslationInput;
use blog_core::application::dto::posts::PublishStateDto;
use blog_core::application::queries::posts::Audience;
use chrono::{Duration, NaiveDate};
use support::{TestApp, TestAppOptions, at, de, en, fr, is_not_found, post, post_at, test_now, translation};

fn titles(posts: &[blog_core::application::dto::PostDto]) -> Vec<&str> {
    posts.iter().filter_map(|p| p.title.as_deref()).collect()
}

#[tokio::test]
async fn posts_go_live_exactly_at_their_publish_time() {
    let app = TestApp::new();
    let now = test_now();
    app.create_post(post_at("On time", now).build()).await;
    let early = app
        .create_post(post_at("A second early", now + Duration::seconds(1)).build())
        .await;
    assert_eq!(early.state, PublishStateDto::Scheduled);
    let queries = &app.services.post_queries;

    let live = queries
        .by_slug("on-time", &en(), Audience::Public)
        .await
        .unwrap()
        .unwrap();
    assert!(live.is_live());

    assert!(
        queries
            .by_slug("a-second-early", &en(), Audience::Public)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        queries
            .by_slug("a-second-early", &en(), Audience::Admin)
            .await
            .unwrap()
            .is_some()
    );
    let err = queries
        .by_id(early.id, &en(), Audience::Public)
        .await
        .unwrap_err();
    assert!(is_not_found(&err));

    app.clock.advance(Duration::seconds(1));
    let now_live = queries
        .by_slug("a-second-early", &en(), Audience::Public)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(now_live.state, PublishStateDto::Live);
}

#[tokio::test]
async fn drafts_are_hidden_from_the_public() {
    let app = TestApp::new();
    let draft = app.create_post(post("Work in progress").draft(true).build()).await;
    assert_eq!(draft.state, PublishStateDto::Draft);
    let queries = &app.services.post_queries;

    assert!(
        queries
            .by_title("Work in progress", &en(), Audience::Public)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        queries
            .by_title("Work in progress", &en(), Audience::Admin)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn titles_match_in_any_locale() {
    let app = TestApp::new();
    let created = app
        .create_post(
            post("Hello")
                .translation(translation("fr", "Bonjour", "Corps"))
                .build(),
        )
        .await;

    let found = app
        .services
        .post_queries
        .by_title("Bonjour", &en(), Audience::Public)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.title.as_deref(), Some("Hello"));
}

#[tokio::test]
async fn live_listing_pages_newest_first() {
    let app = TestApp::with_options(TestAppOptions {
        per_page: 2,
        ..TestAppOptions::default()
    });
    app.create_post(post_at("Oldest", at(2024, 1, 1)).build()).await;
    app.create_post(post_at("Middle", at(2024, 2, 1)).build()).await;
    app.create_post(post_at("Newest", at(2024, 3, 1)).build()).await;
    app.create_post(post_at("Hidden", at(2024, 4, 1)).draft(true).build())
        .await;
    app.create_post(post_at("Upcoming", at(2024, 12, 1)).build()).await;
    let queries = &app.services.post_queries;

    let first = queries.list_live(1, &en()).await.unwrap();
    assert_eq!(titles(&first.items), vec!["Newest", "Middle"]);
    assert_eq!(first.total, 3);
    assert_eq!(first.total_pages, 2);
    assert!(first.has_next());

    let second = queries.list_live(2, &en()).await.unwrap();
    assert_eq!(titles(&second.items), vec!["Oldest"]);
    assert!(!second.has_next());

    let all = queries.list_all(1, &en()).await.unwrap();
    assert_eq!(all.total, 5);
}

#[tokio::test]
async fn admin_listing_includes_posts_missing_the_locale() {
    let app = TestApp::new();
    app.create_post(
        post("Bilingual")
            .translation(translation("fr", "Bilingue", "Corps"))
            .build(),
    )
    .await;
    app.create_post(post("English only").build()).await;
    let queries = &app.services.post_queries;

    let all = queries.list_all(1, &fr()).await.unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.items.iter().filter(|p| p.title.is_none()).count(), 1);

    let live = queries.list_live(1, &fr()).await.unwrap();
    assert_eq!(titles(&live.items), vec!["Bilingue"]);
}

#[tokio::test]
async fn navigation_follows_the_publish_timeline() {
    let app = TestApp::new();
    let jan1 = app.create_post(post_at("January first", at(2024, 1, 1)).build()).await;
    app.create_post(post_at("Draft", at(2024, 1, 10)).draft(true).build())
        .await;
    let jan15 = app.create_post(post_at("Mid January", at(2024, 1, 15)).build()).await;
    let feb1 = app.create_post(post_at("February", at(2024, 2, 1)).build()).await;
    let queries = &app.services.post_queries;

    let next = queries.next(jan1.id, &en()).await.unwrap().unwrap();
    assert_eq!(next.id, jan15.id);
    let next = queries.next(jan15.id, &en()).await.unwrap().unwrap();
    assert_eq!(next.id, feb1.id);
    assert!(queries.next(feb1.id, &en()).await.unwrap().is_none());

    let previous = queries.previous(feb1.id, &en()).await.unwrap().unwrap();
    assert_eq!(previous.id, jan15.id);
    let previous = queries.previous(jan15.id, &en()).await.unwrap().unwrap();
    assert_eq!(previous.id, jan1.id);
    assert!(queries.previous(jan1.id, &en()).await.unwrap().is_none());

    let err = queries.next(999, &en()).await.unwrap_err();
    assert!(is_not_found(&err));
}

#[tokio::test]
async fn previous_includes_scheduled_posts() {
    let app = TestApp::new();
    let scheduled = app
        .create_post(post_at("Scheduled", at(2024, 7, 1)).build())
        .await;
    let later = app
        .create_post(post_at("Later", at(2024, 8, 1)).build())
        .await;

    let previous = app
        .services
        .post_queries
        .previous(later.id, &en())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(previous.id, scheduled.id);
    assert_eq!(previous.state, PublishStateDto::Scheduled);
}

#[tokio::test]
async fn navigation_skips_posts_without_the_locale() {
    let app = TestApp::new();
    let first = app
        .create_post(
            post_at("First", at(2024, 1, 1))
                .translation(translation("fr", "Premier", "Corps"))
                .build(),
        )
        .await;
    app.create_post(post_at("English only", at(2024, 1, 2)).build())
        .await;
    let third = app
        .create_post(
            post_at("Third", at(2024, 1, 3))
                .translation(translation("fr", "Troisième", "Corps"))
                .build(),
        )
        .await;

    let next = app
        .services
        .post_queries
        .next(first.id, &fr())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next.id, third.id);
}

#[tokio::test]
async fn monthly_archive_ignores_locale_and_draft_state() {
    let app = TestApp::new();
    app.create_post(
        post_at("Translated", at(2024, 1, 5))
            .translation(translation("fr", "Traduit", "Corps"))
            .build(),
    )
    .await;
    app.create_post(post_at("Untranslated", at(2024, 1, 20)).draft(true).build())
        .await;
    app.create_post(post_at("February", at(2024, 2, 1)).build()).await;
    let queries = &app.services.post_queries;
    let january = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();

    let month = queries.by_month(january, &fr()).await.unwrap();
    assert_eq!(month.len(), 2);
    assert_eq!(month[0].title, None);
    assert_eq!(month[1].title.as_deref(), Some("Traduit"));

    let translated = queries.by_month_translated(january, &fr()).await.unwrap();
    assert_eq!(titles(&translated), vec!["Traduit"]);
    let translated = queries.by_month_translated(january, &de()).await.unwrap();
    assert!(translated.is_empty());

    let year = queries.by_year(january, &fr()).await.unwrap();
    assert_eq!(titles(&year), vec!["Traduit"]);

    let year = queries.by_year(january, &en()).await.unwrap();
    assert_eq!(titles(&year), vec!["February", "Untranslated", "Translated"]);
}

#[tokio::test]
async fn recent_and_popular_listings() {
    let app = TestApp::new();
    let a = app.create_post(post_at("A", at(2024, 1, 1)).build()).await;
    let b = app.create_post(post_at("B", at(2024, 2, 1)).build()).await;
    let c = app.create_post(post_at("C", at(2024, 3, 1)).build()).await;
    app.create_post(post_at("Future", at(2025, 1, 1)).build()).await;
    let commands = &app.services.post_commands;
    let queries = &app.services.post_queries;

    let recent = queries.recent(2, &en()).await.unwrap();
    assert_eq!(titles(&recent), vec!["C", "B"]);

    commands.record_view(b.id).await.unwrap();
    commands.record_view(b.id).await.unwrap();
    commands.record_view(a.id).await.unwrap();

    let popular = queries.popular(2, &en()).await.unwrap();
    assert_eq!(popular[0].id, b.id);
    assert_eq!(popular[0].access_count, 2);
    assert_eq!(popular[1].id, a.id);
    assert_ne!(popular[1].id, c.id);

    let err = commands.record_view(12345).await.unwrap_err();
    assert!(is_not_found(&err));
}

#[tokio::test]
async fn published_dates_before_a_point_in_time() {
    let app = TestApp::new();
    app.create_post(post_at("Jan 1", at(2024, 1, 1)).build()).await;
    app.create_post(post_at("Draft", at(2024, 1, 10)).draft(true).build())
        .await;
    app.create_post(post_at("Jan 15", at(2024, 1, 15)).build()).await;
    app.create_post(post_at("Feb 1", at(2024, 2, 1)).build()).await;

    let dates = app
        .services
        .post_queries
        .published_dates_older_than(at(2024, 2, 1), &en())
        .await
        .unwrap();
    assert_eq!(dates, vec![at(2024, 1, 15), at(2024, 1, 1)]);
}

#[tokio::test]
async fn tagged_listing_only_shows_live_posts_with_the_tag() {
    let app = TestApp::new();
    app.create_post(post("Rust post").tag("rust").tag("sql").build()).await;
    app.create_post(post("Go post").tag("go").build()).await;
    app.create_post(post("Rust draft").tag("rust").draft(true).build())
        .await;

    let page = app
        .services
        .post_queries
        .tagged("rust", 1, &en())
        .await
        .unwrap();
    assert_eq!(titles(&page.items), vec!["Rust post"]);
}

#[tokio::test]
async fn seo_metadata_is_read_from_the_translation() {
    let app = TestApp::new();
    let plain = app.create_post(post("Plain").build()).await;
    assert_eq!(plain.meta_title, None);

    let tuned = app
        .create_post(
            blog_core::application::commands::posts::CreatePostCommand::builder()
                .translation(
                    PostTranslationInput::new("en")
                        .title("Tuned")
                        .body("Body")
                        .meta_title("Search title")
                        .meta_description("Search description"),
                )
                .published_at(at(2024, 1, 1))
                .username("ada")
                .build(),
        )
        .await;
    assert_eq!(tuned.meta_title.as_deref(), Some("Search title"));
    assert_eq!(tuned.meta_description.as_deref(), Some("Search description"));
}
