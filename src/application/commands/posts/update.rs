// src/application/commands/posts/update.rs
use super::{PostCommandService, PostTranslationInput};
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::ValidationErrors,
        post::{PostId, PostUpdate, validation},
        user::Username,
    },
};
use chrono::{DateTime, Utc};

/// Partial update. `None` keeps the stored value; for `username` and
/// `source_url` an empty string clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub id: i64,
    pub translations: Vec<PostTranslationInput>,
    pub draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub username: Option<String>,
    pub source_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category_ids: Option<Vec<i64>>,
    pub skip_source_url_check: bool,
}

impl PostCommandService {
    pub async fn update_post(&self, command: UpdatePostCommand) -> ApplicationResult<PostDto> {
        let id = PostId::new(command.id)?;
        let default_locale = self.locales.default_locale();
        let current = self
            .read_repo
            .find_by_id(id, &default_locale)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;

        let mut errors = ValidationErrors::new();
        let mut update = PostUpdate::new(id, self.clock.now());

        update.translations = self
            .build_translations(Some(id), command.translations, &mut errors)
            .await?;
        self.check_title_uniqueness(Some(id), &update.translations, &mut errors)
            .await?;

        if let Some(draft) = command.draft {
            update = update.with_draft(draft);
        }
        if let Some(published_at) = command.published_at {
            update = update.with_published_at(published_at);
        }

        let username = match command.username {
            Some(raw) if raw.trim().is_empty() => {
                update = update.with_username(None);
                None
            }
            Some(raw) => {
                let username = errors.collect(Username::new(raw))?;
                if username.is_some() {
                    update = update.with_username(username.clone());
                }
                username
            }
            None => current.username.clone(),
        };
        let identity = self.resolve_identity(current.user_id).await?;
        validation::validate_author(self.rules, identity.as_ref(), username.as_ref(), &mut errors);

        if let Some(raw) = command.source_url.as_deref() {
            let source_url = self
                .check_source_url(raw, command.skip_source_url_check, &mut errors)
                .await?;
            update = update.with_source_url(source_url);
        }
        if let Some(raw_tags) = command.tags {
            let tags = self.parse_tags(raw_tags, &mut errors)?;
            update = update.with_tags(tags);
        }
        if let Some(raw_ids) = command.category_ids {
            let ids = self.resolve_categories(raw_ids, &mut errors).await?;
            update = update.with_categories(ids);
        }

        if !errors.is_empty() {
            tracing::warn!(post_id = %id, failures = %errors, "post update rejected");
            return Err(ApplicationError::Validation(errors));
        }

        self.write_repo.update(update).await?;
        tracing::info!(post_id = %id, "post updated");

        let post = self
            .read_repo
            .find_by_id(id, &default_locale)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        self.facade.post_view(post).await
    }
}
