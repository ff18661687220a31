// src/application/queries/posts/lookup.rs
use super::{Audience, PostQueryService};
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        locale::Locale,
        post::{PostField, PostId, PostQuery},
        translation::{Condition, FieldValue},
    },
};

impl PostQueryService {
    /// Resolves a slug within `locale`. Slugs of other locales never match.
    pub async fn by_slug(
        &self,
        slug: &str,
        locale: &Locale,
        audience: Audience,
    ) -> ApplicationResult<Option<PostDto>> {
        let mut query = PostQuery::new(locale.clone())
            .translated()
            .filter(Condition::eq(PostField::Slug, FieldValue::Text(slug.to_string())));
        if audience == Audience::Public {
            query = query.live(self.clock.now());
        }
        self.first(query).await
    }

    /// Titles are unique across locales, so the match may come from any
    /// locale; the view is assembled in `locale`.
    pub async fn by_title(
        &self,
        title: &str,
        locale: &Locale,
        audience: Audience,
    ) -> ApplicationResult<Option<PostDto>> {
        let ids = self
            .translations
            .ids_by_translated_field("title", title, None)
            .await?;
        let Some(id) = ids.into_iter().next() else {
            return Ok(None);
        };
        let id = PostId::new(id)?;
        match self.read_repo.find_by_id(id, locale).await? {
            Some(post) if self.visible(&post, audience) => {
                Ok(Some(self.facade.post_view(post).await?))
            }
            _ => Ok(None),
        }
    }

    pub async fn by_id(
        &self,
        id: i64,
        locale: &Locale,
        audience: Audience,
    ) -> ApplicationResult<PostDto> {
        let id = PostId::new(id)?;
        let post = self
            .read_repo
            .find_by_id(id, locale)
            .await?
            .filter(|post| self.visible(post, audience))
            .ok_or_else(|| ApplicationError::not_found("post not found"))?;
        self.facade.post_view(post).await
    }
}
