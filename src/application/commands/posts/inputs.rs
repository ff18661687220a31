// src/application/commands/posts/inputs.rs
use super::PostCommandService;
use crate::{
    application::{error::ApplicationResult, ports::links::LinkStatus},
    domain::{
        category::CategoryId,
        errors::ValidationErrors,
        locale::Locale,
        post::{PostBody, PostId, PostTitle, PostTranslation, SourceUrl, Tag},
        taxonomy::dedup_categories,
        translation::TranslationBuffer,
        user::{AuthorIdentity, UserId},
    },
};

/// Translated fields for one locale. On update, `None` keeps the stored
/// value; an empty string clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct PostTranslationInput {
    pub locale: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub custom_url: Option<String>,
    pub custom_teaser: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl PostTranslationInput {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn custom_url(mut self, custom_url: impl Into<String>) -> Self {
        self.custom_url = Some(custom_url.into());
        self
    }

    pub fn custom_teaser(mut self, custom_teaser: impl Into<String>) -> Self {
        self.custom_teaser = Some(custom_teaser.into());
        self
    }

    pub fn meta_title(mut self, meta_title: impl Into<String>) -> Self {
        self.meta_title = Some(meta_title.into());
        self
    }

    pub fn meta_description(mut self, meta_description: impl Into<String>) -> Self {
        self.meta_description = Some(meta_description.into());
        self
    }
}

fn overlay(input: Option<String>, existing: Option<&str>) -> Option<String> {
    match input {
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value),
        None => existing.map(str::to_owned),
    }
}

impl PostCommandService {
    /// Builds the full row for every locale in `inputs`, starting from the
    /// stored row when the post already has one. Slugs are regenerated when
    /// the title changes.
    pub(super) async fn build_translations(
        &self,
        post_id: Option<PostId>,
        inputs: Vec<PostTranslationInput>,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<TranslationBuffer<PostTranslation>> {
        let mut buffer = TranslationBuffer::new();

        for input in inputs {
            let Some(locale) = errors.collect(Locale::new(input.locale.clone()))? else {
                continue;
            };
            if buffer.get(&locale).is_some() {
                errors.add("translations", format!("lists locale {locale} more than once"));
                continue;
            }

            let existing = match post_id {
                Some(id) => {
                    self.translations
                        .get_translation(i64::from(id), &locale)
                        .await?
                }
                None => None,
            };

            let title_raw = input
                .title
                .or_else(|| existing.as_ref().map(|t| t.title.as_str().to_owned()))
                .unwrap_or_default();
            let body_raw = input
                .body
                .or_else(|| existing.as_ref().map(|t| t.body.as_str().to_owned()))
                .unwrap_or_default();
            let title = errors.collect(PostTitle::new(title_raw))?;
            let body = errors.collect(PostBody::new(body_raw))?;
            let (Some(title), Some(body)) = (title, body) else {
                continue;
            };

            let slug = match &existing {
                Some(current) if current.title == title => current.slug.clone(),
                _ => {
                    self.slug_service
                        .slug_for(title.as_str(), &locale, post_id.map(i64::from))
                        .await?
                }
            };

            let mut translation = PostTranslation::new(locale, title, body, slug);
            translation.custom_url = overlay(
                input.custom_url,
                existing.as_ref().and_then(|t| t.custom_url.as_deref()),
            );
            translation.custom_teaser = overlay(
                input.custom_teaser,
                existing.as_ref().and_then(|t| t.custom_teaser.as_deref()),
            );
            translation.set_meta_title(overlay(
                input.meta_title,
                existing.as_ref().and_then(PostTranslation::meta_title),
            ));
            translation.set_meta_description(overlay(
                input.meta_description,
                existing.as_ref().and_then(PostTranslation::meta_description),
            ));
            buffer.put(translation);
        }

        Ok(buffer)
    }

    /// Titles are unique across posts in every locale; a post may reuse its
    /// own title in several locales.
    pub(super) async fn check_title_uniqueness(
        &self,
        post_id: Option<PostId>,
        buffer: &TranslationBuffer<PostTranslation>,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<()> {
        for translation in buffer.iter() {
            let holders = self
                .translations
                .ids_by_translated_field("title", translation.title.as_str(), None)
                .await?;
            let owner = post_id.map(i64::from);
            if holders.iter().any(|id| Some(*id) != owner) {
                errors.add("title", "has already been taken");
            }
        }
        Ok(())
    }

    pub(super) async fn check_source_url(
        &self,
        raw: &str,
        skip_check: bool,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<Option<SourceUrl>> {
        let Some(parsed) = errors.collect(SourceUrl::parse(raw))? else {
            return Ok(None);
        };
        let Some(url) = parsed else {
            return Ok(None);
        };

        if self.rules.validate_source_url && !skip_check {
            if let LinkStatus::Unreachable { reason } = self.links.check(url.as_str()).await {
                tracing::warn!(url = %url.as_str(), %reason, "source url failed validation");
                errors.add("source_url", format!("could not be resolved ({reason})"));
            }
        }

        Ok(Some(url))
    }

    pub(super) async fn resolve_categories(
        &self,
        raw_ids: Vec<i64>,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<Vec<CategoryId>> {
        let default_locale = self.locales.default_locale();
        let mut ids = Vec::with_capacity(raw_ids.len());
        for raw in raw_ids {
            let Some(id) = errors.collect(CategoryId::new(raw))? else {
                continue;
            };
            if self
                .categories
                .find_by_id(id, &default_locale)
                .await?
                .is_none()
            {
                errors.add("category_ids", format!("category {id} does not exist"));
                continue;
            }
            ids.push(id);
        }
        Ok(dedup_categories(ids))
    }

    pub(super) async fn resolve_identity(
        &self,
        user_id: Option<UserId>,
    ) -> ApplicationResult<Option<AuthorIdentity>> {
        match (&self.authors, user_id) {
            (Some(directory), Some(id)) => directory.find_author(id).await,
            _ => Ok(None),
        }
    }

    pub(super) fn parse_tags(
        &self,
        raw: Vec<String>,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<Vec<Tag>> {
        Ok(errors.collect(Tag::parse_list(raw))?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::overlay;

    #[test]
    fn overlay_keeps_clears_or_replaces() {
        assert_eq!(overlay(None, Some("kept")), Some("kept".to_string()));
        assert_eq!(overlay(Some("  ".into()), Some("kept")), None);
        assert_eq!(overlay(Some("new".into()), Some("kept")), Some("new".to_string()));
    }
}
