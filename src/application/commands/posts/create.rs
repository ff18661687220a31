// src/application/commands/posts/create.rs
use super::{PostCommandService, PostTranslationInput};
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::ValidationErrors,
        post::{NewPost, validation},
        user::{UserId, Username},
    },
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub translations: Vec<PostTranslationInput>,
    pub draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    pub category_ids: Vec<i64>,
    /// Saves without contacting the source URL even when validation is on.
    pub skip_source_url_check: bool,
}

impl CreatePostCommand {
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    command: CreatePostCommand,
}

impl CreatePostCommandBuilder {
    pub fn translation(mut self, translation: PostTranslationInput) -> Self {
        self.command.translations.push(translation);
        self
    }

    pub fn draft(mut self, draft: bool) -> Self {
        self.command.draft = draft;
        self
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.command.published_at = Some(published_at);
        self
    }

    pub fn user_id(mut self, user_id: i64) -> Self {
        self.command.user_id = Some(user_id);
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.command.username = Some(username.into());
        self
    }

    pub fn source_url(mut self, source_url: impl Into<String>) -> Self {
        self.command.source_url = Some(source_url.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.command.tags.push(tag.into());
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.command.category_ids.push(category_id);
        self
    }

    pub fn skip_source_url_check(mut self) -> Self {
        self.command.skip_source_url_check = true;
        self
    }

    pub fn build(self) -> CreatePostCommand {
        self.command
    }
}

impl PostCommandService {
    /// Validates everything up front and rejects the save with the complete
    /// list of field failures; nothing is written unless all checks pass.
    pub async fn create_post(&self, command: CreatePostCommand) -> ApplicationResult<PostDto> {
        let mut errors = ValidationErrors::new();
        let default_locale = self.locales.default_locale();

        let translations = self
            .build_translations(None, command.translations, &mut errors)
            .await?;
        if translations.get(&default_locale).is_none() && !errors.has_field("translations") {
            errors.add(
                "translations",
                format!("must include the default locale ({default_locale})"),
            );
        }
        self.check_title_uniqueness(None, &translations, &mut errors)
            .await?;

        let published_at = validation::require_published_at(command.published_at, &mut errors);

        let user_id = match command.user_id {
            Some(raw) => errors.collect(UserId::new(raw))?,
            None => None,
        };
        let username = match command.username.filter(|name| !name.trim().is_empty()) {
            Some(raw) => errors.collect(Username::new(raw))?,
            None => None,
        };
        let identity = self.resolve_identity(user_id).await?;
        validation::validate_author(self.rules, identity.as_ref(), username.as_ref(), &mut errors);

        let source_url = match command.source_url.as_deref() {
            Some(raw) => {
                self.check_source_url(raw, command.skip_source_url_check, &mut errors)
                    .await?
            }
            None => None,
        };
        let tags = self.parse_tags(command.tags, &mut errors)?;
        let category_ids = self
            .resolve_categories(command.category_ids, &mut errors)
            .await?;

        let Some(published_at) = published_at.filter(|_| errors.is_empty()) else {
            tracing::warn!(failures = %errors, "post rejected");
            return Err(ApplicationError::Validation(errors));
        };

        let new_post = NewPost {
            draft: command.draft,
            published_at,
            user_id: identity.as_ref().map(|identity| identity.id),
            username,
            source_url,
            tags,
            translations,
            category_ids,
            created_at: self.clock.now(),
        };

        let id = self.write_repo.insert(new_post).await?;
        tracing::info!(post_id = %id, "post created");

        let post = self
            .read_repo
            .find_by_id(id, &default_locale)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post vanished after insert"))?;
        self.facade.post_view(post).await
    }
}
