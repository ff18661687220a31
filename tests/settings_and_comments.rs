mod support;

use blog_core::application::ApplicationError;
use blog_core::application::commands::comments::AddCommentCommand;
use blog_core::application::ports::settings::SettingsStore;
use blog_core::application::services::settings::BlogSettingsService;
use chrono::Duration;
use serde_json::Value;
use support::{TestApp, TestAppOptions, en, failed_fields, is_not_found, post};

fn comment(post_id: i64, body: &str) -> AddCommentCommand {
    AddCommentCommand {
        post_id,
        name: "Reader".into(),
        email: "reader@example.com".into(),
        body: body.into(),
    }
}

#[tokio::test]
async fn settings_default_on_and_persist() {
    let app = TestApp::new();
    let settings = &app.services.settings;

    let snapshot = settings.snapshot().await.unwrap();
    assert!(snapshot.comments_allowed);
    assert!(snapshot.teasers_enabled);

    assert!(!settings.toggle_teasers().await.unwrap());
    assert!(!settings.teasers_enabled().await.unwrap());
    assert!(settings.toggle_teasers().await.unwrap());

    settings.set_comments_allowed(false).await.unwrap();
    assert!(!settings.snapshot().await.unwrap().comments_allowed);
}

#[tokio::test]
async fn page_size_comes_from_the_configured_default() {
    let app = TestApp::with_options(TestAppOptions {
        per_page: 3,
        ..TestAppOptions::default()
    });
    assert_eq!(app.services.settings.posts_per_page(), 3);
}

#[tokio::test]
async fn page_size_follows_configuration_after_a_restart() {
    let app = TestApp::new();
    let first = BlogSettingsService::new(app.store.clone(), "blog", 10);
    assert_eq!(first.posts_per_page(), 10);
    first.snapshot().await.unwrap();

    let restarted = BlogSettingsService::new(app.store.clone(), "blog", 3);
    assert_eq!(restarted.posts_per_page(), 3);

    // the page size never lands in the shared store
    let stored = app
        .store
        .find_or_set("posts_per_page", Value::Null, "blog")
        .await
        .unwrap();
    assert_eq!(stored, Value::Null);
}

#[tokio::test]
async fn listings_use_the_configured_page_size() {
    let app = TestApp::with_options(TestAppOptions {
        per_page: 2,
        ..TestAppOptions::default()
    });
    for title in ["One", "Two", "Three"] {
        app.create_post(post(title).build()).await;
    }

    let page = app.services.post_queries.list_all(1, &en()).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.per_page, 2);
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let app = TestApp::new();
    let created = app.create_post(post("Discussed").build()).await;
    let commands = &app.services.comment_commands;

    commands.add_comment(comment(created.id, "First")).await.unwrap();
    app.clock.advance(Duration::minutes(5));
    commands.add_comment(comment(created.id, "Second")).await.unwrap();

    let queries = &app.services.comment_queries;
    let listed = queries.list_for_post(created.id).await.unwrap();
    let bodies: Vec<_> = listed.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["First", "Second"]);
    assert_eq!(queries.count_for_post(created.id).await.unwrap(), 2);
}

#[tokio::test]
async fn comments_are_refused_when_disabled() {
    let app = TestApp::new();
    let created = app.create_post(post("Closed").build()).await;
    app.services.settings.set_comments_allowed(false).await.unwrap();

    let err = app
        .services
        .comment_commands
        .add_comment(comment(created.id, "Let me in"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn invalid_comments_are_rejected() {
    let app = TestApp::new();
    let created = app.create_post(post("Open").build()).await;
    let commands = &app.services.comment_commands;

    let err = commands
        .add_comment(AddCommentCommand {
            post_id: created.id,
            name: " ".into(),
            email: "nobody".into(),
            body: "Hi".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(failed_fields(&err), vec!["name", "email"]);

    let err = commands.add_comment(comment(999, "Lost")).await.unwrap_err();
    assert!(is_not_found(&err));
}
