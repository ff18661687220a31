// src/application/queries/posts/timeline.rs
use chrono::{DateTime, NaiveDate, Utc};

use super::PostQueryService;
use crate::{
    application::{
        dto::PostDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        locale::Locale,
        post::{navigation, Post, PostId},
    },
};

impl PostQueryService {
    async fn reference(&self, id: i64, locale: &Locale) -> ApplicationResult<Post> {
        let id = PostId::new(id)?;
        self.read_repo
            .find_by_id(id, locale)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))
    }

    /// The post published right after post `id`, if any.
    pub async fn next(&self, id: i64, locale: &Locale) -> ApplicationResult<Option<PostDto>> {
        let current = self.reference(id, locale).await?;
        self.first(navigation::next_query(current.published_at, locale.clone()))
            .await
    }

    /// The post published right before post `id`, if any. Scheduled posts
    /// count here because only the draft flag is checked.
    pub async fn previous(&self, id: i64, locale: &Locale) -> ApplicationResult<Option<PostDto>> {
        let current = self.reference(id, locale).await?;
        self.first(navigation::previous_query(current.published_at, locale.clone()))
            .await
    }

    pub async fn by_month(&self, date: NaiveDate, locale: &Locale) -> ApplicationResult<Vec<PostDto>> {
        self.all(navigation::month_query(date, locale.clone())?).await
    }

    /// Like [`Self::by_month`] but restricted to posts translated into
    /// `locale`.
    pub async fn by_month_translated(
        &self,
        date: NaiveDate,
        locale: &Locale,
    ) -> ApplicationResult<Vec<PostDto>> {
        self.all(navigation::month_query(date, locale.clone())?.translated())
            .await
    }

    pub async fn by_year(&self, date: NaiveDate, locale: &Locale) -> ApplicationResult<Vec<PostDto>> {
        self.all(navigation::year_query(date, locale.clone())?).await
    }

    pub async fn recent(&self, count: u32, locale: &Locale) -> ApplicationResult<Vec<PostDto>> {
        self.all(navigation::recent_query(count, self.clock.now(), locale.clone()))
            .await
    }

    pub async fn popular(&self, count: u32, locale: &Locale) -> ApplicationResult<Vec<PostDto>> {
        self.all(navigation::popular_query(count, locale.clone())).await
    }

    /// Publication times of non-draft posts strictly before `date`, newest
    /// first.
    pub async fn published_dates_older_than(
        &self,
        date: DateTime<Utc>,
        locale: &Locale,
    ) -> ApplicationResult<Vec<DateTime<Utc>>> {
        let posts = self
            .read_repo
            .find(&navigation::published_before_query(date, locale.clone()))
            .await?;
        Ok(posts.into_iter().map(|post| post.published_at).collect())
    }
}
