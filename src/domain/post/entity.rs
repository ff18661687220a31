// src/domain/post/entity.rs
use crate::domain::category::CategoryId;
use crate::domain::post::publish::{self, PublishState};
use crate::domain::post::translation::PostTranslation;
use crate::domain::post::value_objects::{PostId, SourceUrl, Tag};
use crate::domain::translation::TranslationBuffer;
use crate::domain::user::{UserId, Username};
use chrono::{DateTime, Utc};

/// A post as read for one locale: base attributes plus the translation row
/// for that locale, when one exists.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub draft: bool,
    pub published_at: DateTime<Utc>,
    pub access_count: i64,
    pub user_id: Option<UserId>,
    pub username: Option<Username>,
    pub source_url: Option<SourceUrl>,
    pub tags: Vec<Tag>,
    pub translation: Option<PostTranslation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        publish::is_live(self.draft, self.published_at, now)
    }

    pub fn publish_state(&self, now: DateTime<Utc>) -> PublishState {
        PublishState::of(self.draft, self.published_at, now)
    }

    pub fn title(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.title.as_str())
    }

    pub fn body(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.body.as_str())
    }

    pub fn slug(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.slug.as_str())
    }

    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub draft: bool,
    pub published_at: DateTime<Utc>,
    pub user_id: Option<UserId>,
    pub username: Option<Username>,
    pub source_url: Option<SourceUrl>,
    pub tags: Vec<Tag>,
    pub translations: TranslationBuffer<PostTranslation>,
    pub category_ids: Vec<CategoryId>,
    pub created_at: DateTime<Utc>,
}

/// Changes to persist in one save. Base attributes left as `None` keep their
/// stored value; every buffered translation replaces its locale's row.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub username: Option<Option<Username>>,
    pub source_url: Option<Option<SourceUrl>>,
    pub tags: Option<Vec<Tag>>,
    pub translations: TranslationBuffer<PostTranslation>,
    pub category_ids: Option<Vec<CategoryId>>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    pub fn new(id: PostId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            draft: None,
            published_at: None,
            username: None,
            source_url: None,
            tags: None,
            translations: TranslationBuffer::new(),
            category_ids: None,
            updated_at,
        }
    }

    pub fn with_draft(mut self, draft: bool) -> Self {
        self.draft = Some(draft);
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn with_username(mut self, username: Option<Username>) -> Self {
        self.username = Some(username);
        self
    }

    pub fn with_source_url(mut self, source_url: Option<SourceUrl>) -> Self {
        self.source_url = Some(source_url);
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_translation(mut self, translation: PostTranslation) -> Self {
        self.translations.put(translation);
        self
    }

    pub fn with_categories(mut self, category_ids: Vec<CategoryId>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }

    /// Applies the base-attribute changes to an in-memory copy.
    pub fn apply_base(&self, post: &mut Post) {
        if let Some(draft) = self.draft {
            post.draft = draft;
        }
        if let Some(published_at) = self.published_at {
            post.published_at = published_at;
        }
        if let Some(username) = &self.username {
            post.username = username.clone();
        }
        if let Some(source_url) = &self.source_url {
            post.source_url = source_url.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        post.updated_at = self.updated_at;
    }
}
