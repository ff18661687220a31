// src/domain/post/query.rs
use crate::domain::category::CategoryId;
use crate::domain::locale::Locale;
use crate::domain::post::publish;
use crate::domain::post::value_objects::Tag;
use crate::domain::translation::{Condition, QueryField};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostField {
    Title,
    Body,
    CustomUrl,
    CustomTeaser,
    Slug,
    Draft,
    PublishedAt,
    AccessCount,
    UserId,
    Username,
    SourceUrl,
}

impl QueryField for PostField {
    fn column(self) -> &'static str {
        match self {
            PostField::Title => "title",
            PostField::Body => "body",
            PostField::CustomUrl => "custom_url",
            PostField::CustomTeaser => "custom_teaser",
            PostField::Slug => "slug",
            PostField::Draft => "draft",
            PostField::PublishedAt => "published_at",
            PostField::AccessCount => "access_count",
            PostField::UserId => "user_id",
            PostField::Username => "username",
            PostField::SourceUrl => "source_url",
        }
    }

    fn is_translated(self) -> bool {
        matches!(
            self,
            PostField::Title
                | PostField::Body
                | PostField::CustomUrl
                | PostField::CustomTeaser
                | PostField::Slug
        )
    }
}

/// How the translation table participates in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleJoin {
    /// Only posts with a row for the locale.
    Inner,
    /// Every post; the translation is attached when present.
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    NewestFirst,
    OldestFirst,
    MostViewed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    Any,
    In(CategoryId),
    Uncategorized,
}

/// Declarative post query. Storage backends route each condition to the base
/// or translation table and break ordering ties by ascending id.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub locale: Locale,
    pub join: LocaleJoin,
    pub conditions: Vec<Condition<PostField>>,
    pub category: CategoryScope,
    pub tag: Option<Tag>,
    pub order: PostOrder,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl PostQuery {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            join: LocaleJoin::Left,
            conditions: Vec::new(),
            category: CategoryScope::Any,
            tag: None,
            order: PostOrder::NewestFirst,
            limit: None,
            offset: 0,
        }
    }

    /// Restricts to posts translated into the query locale.
    pub fn translated(mut self) -> Self {
        self.join = LocaleJoin::Inner;
        self
    }

    pub fn filter(mut self, condition: Condition<PostField>) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn filters(mut self, conditions: impl IntoIterator<Item = Condition<PostField>>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Live posts in the query locale.
    pub fn live(self, now: DateTime<Utc>) -> Self {
        self.translated().filters(publish::live_conditions(now))
    }

    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = CategoryScope::In(category);
        self
    }

    pub fn uncategorized(mut self) -> Self {
        self.category = CategoryScope::Uncategorized;
        self
    }

    pub fn tagged(mut self, tag: Tag) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn order(mut self, order: PostOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// The same filters without paging, for counting.
    pub fn unpaged(&self) -> Self {
        let mut query = self.clone();
        query.limit = None;
        query.offset = 0;
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::translation::route_conditions;
    use chrono::TimeZone;

    #[test]
    fn live_query_joins_the_locale_and_routes_to_base_columns() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = PostQuery::new(Locale::new("en").unwrap()).live(now);

        assert_eq!(query.join, LocaleJoin::Inner);
        let routed = route_conditions(&query.conditions);
        assert_eq!(routed.base.len(), 2);
        assert!(!routed.has_translated());
    }

    #[test]
    fn translatable_fields_are_classified() {
        assert!(PostField::Slug.is_translated());
        assert!(PostField::Title.is_translated());
        assert!(!PostField::AccessCount.is_translated());
        assert!(!PostField::Username.is_translated());
    }
}
