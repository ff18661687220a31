// src/application/dto/posts.rs
use crate::domain::post::{Post, PublishState};
use crate::domain::user::Author;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStateDto {
    Draft,
    Scheduled,
    Live,
}

impl From<PublishState> for PublishStateDto {
    fn from(state: PublishState) -> Self {
        match state {
            PublishState::Draft => PublishStateDto::Draft,
            PublishState::Scheduled => PublishStateDto::Scheduled,
            PublishState::Live => PublishStateDto::Live,
        }
    }
}

/// Addressable view of a post: base attributes, the requested locale's
/// translation (absent fields when that locale has no row), SEO metadata and
/// the resolved author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDto {
    pub id: i64,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub custom_url: Option<String>,
    pub custom_teaser: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub draft: bool,
    pub state: PublishStateDto,
    #[serde(with = "serde_time")]
    pub published_at: DateTime<Utc>,
    pub access_count: i64,
    pub author_id: Option<i64>,
    pub author_username: Option<String>,
    pub source_url: Option<String>,
    pub tags: Vec<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl PostDto {
    pub fn assemble(post: Post, author: &Author, now: DateTime<Utc>) -> Self {
        let state = post.publish_state(now).into();
        let meta_title = post.meta_title().map(str::to_owned);
        let meta_description = post.meta_description().map(str::to_owned);
        let (locale, title, slug, body, custom_url, custom_teaser) = match post.translation {
            Some(t) => (
                Some(String::from(t.locale)),
                Some(t.title.into_inner()),
                Some(t.slug.into_inner()),
                Some(t.body.into_inner()),
                t.custom_url,
                t.custom_teaser,
            ),
            None => (None, None, None, None, None, None),
        };

        Self {
            id: post.id.into(),
            locale,
            title,
            slug,
            body,
            custom_url,
            custom_teaser,
            meta_title,
            meta_description,
            draft: post.draft,
            state,
            published_at: post.published_at,
            access_count: post.access_count,
            author_id: author.identity().map(|identity| identity.id.into()),
            author_username: author.username().map(str::to_owned),
            source_url: post.source_url.map(|url| url.into_inner()),
            tags: post.tags.iter().map(|tag| tag.as_str().to_owned()).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }

    pub fn is_live(&self) -> bool {
        self.state == PublishStateDto::Live
    }
}
