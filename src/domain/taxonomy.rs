// src/domain/taxonomy.rs
//! Category membership and tag queries over live posts.
use crate::domain::category::CategoryId;
use crate::domain::locale::Locale;
use crate::domain::post::{PostOrder, PostQuery, Tag};
use chrono::{DateTime, Utc};

/// Live posts of `category` in `locale`; counting it gives the category's
/// post count.
pub fn category_posts_query(category: CategoryId, now: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .live(now)
        .in_category(category)
        .order(PostOrder::NewestFirst)
}

/// Live posts without any categorization, newest first.
pub fn uncategorized_query(now: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .live(now)
        .uncategorized()
        .order(PostOrder::NewestFirst)
}

/// Live posts carrying `tag`, newest first.
pub fn tagged_query(tag: Tag, now: DateTime<Utc>, locale: Locale) -> PostQuery {
    PostQuery::new(locale)
        .live(now)
        .tagged(tag)
        .order(PostOrder::NewestFirst)
}

/// Removes duplicate category ids, keeping first occurrences.
pub fn dedup_categories(ids: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::{CategoryScope, LocaleJoin};
    use chrono::TimeZone;

    #[test]
    fn counts_are_scoped_to_live_translated_posts() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let category = CategoryId::new(3).unwrap();
        let query = category_posts_query(category, now, Locale::new("en").unwrap());

        assert_eq!(query.join, LocaleJoin::Inner);
        assert_eq!(query.category, CategoryScope::In(category));
        assert_eq!(query.conditions.len(), 2);
    }

    #[test]
    fn dedups_category_ids() {
        let a = CategoryId::new(1).unwrap();
        let b = CategoryId::new(2).unwrap();
        assert_eq!(dedup_categories(vec![a, b, a]), vec![a, b]);
    }
}
