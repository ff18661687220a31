use super::helpers::at;
use blog_core::application::commands::posts::{
    CreatePostCommand, CreatePostCommandBuilder, PostTranslationInput,
};
use chrono::{DateTime, Utc};

/// A valid post with an English translation, published well before the
/// test clock and signed with a plain username.
pub fn post(title: &str) -> CreatePostCommandBuilder {
    CreatePostCommand::builder()
        .translation(
            PostTranslationInput::new("en")
                .title(title)
                .body(format!("Body of {title}")),
        )
        .published_at(at(2024, 1, 1))
        .username("ada")
}

pub fn post_at(title: &str, published_at: DateTime<Utc>) -> CreatePostCommandBuilder {
    post(title).published_at(published_at)
}

pub fn translation(locale: &str, title: &str, body: &str) -> PostTranslationInput {
    PostTranslationInput::new(locale).title(title).body(body)
}
