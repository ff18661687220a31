use super::InMemoryBlogStore;
use super::state::State;
use super::translations::{lookup, put_row, remove_owner};
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::{
    CategoryScope, LocaleJoin, NewPost, Post, PostField, PostId, PostOrder, PostQuery,
    PostReadRepository, PostTranslation, PostUpdate, PostWriteRepository,
};
use crate::domain::translation::{Comparison, Condition, FieldValue, QueryField, TranslatedFields};
use async_trait::async_trait;
use std::cmp::Ordering;

fn base_value(post: &Post, field: PostField) -> Option<FieldValue> {
    match field {
        PostField::Draft => Some(FieldValue::Bool(post.draft)),
        PostField::PublishedAt => Some(FieldValue::Time(post.published_at)),
        PostField::AccessCount => Some(FieldValue::Int(post.access_count)),
        PostField::UserId => post.user_id.map(|id| FieldValue::Int(id.into())),
        PostField::Username => post
            .username
            .as_ref()
            .map(|name| FieldValue::Text(name.as_str().to_string())),
        PostField::SourceUrl => post
            .source_url
            .as_ref()
            .map(|url| FieldValue::Text(url.as_str().to_string())),
        _ => None,
    }
}

/// SQL semantics: a missing value (NULL or no joined row) never matches.
fn compare(comparison: Comparison, actual: Option<FieldValue>, expected: &FieldValue) -> bool {
    match (actual, expected) {
        (Some(FieldValue::Bool(a)), FieldValue::Bool(b)) => comparison.holds(&a, b),
        (Some(FieldValue::Int(a)), FieldValue::Int(b)) => comparison.holds(&a, b),
        (Some(FieldValue::Text(a)), FieldValue::Text(b)) => comparison.holds(&a, b),
        (Some(FieldValue::Time(a)), FieldValue::Time(b)) => comparison.holds(&a, b),
        _ => false,
    }
}

fn satisfies(
    post: &Post,
    translation: Option<&PostTranslation>,
    condition: &Condition<PostField>,
) -> bool {
    let actual = if condition.field.is_translated() {
        translation
            .and_then(|t| t.column(condition.field.column()))
            .map(|value| FieldValue::Text(value.to_string()))
    } else {
        base_value(post, condition.field)
    };
    compare(condition.comparison, actual, &condition.value)
}

fn order(a: &Post, b: &Post, order: PostOrder) -> Ordering {
    let primary = match order {
        PostOrder::NewestFirst => b.published_at.cmp(&a.published_at),
        PostOrder::OldestFirst => a.published_at.cmp(&b.published_at),
        PostOrder::MostViewed => b.access_count.cmp(&a.access_count),
    };
    primary.then(a.id.0.cmp(&b.id.0))
}

fn attach(state: &State, post: &Post, locale: &Locale) -> Post {
    let mut post = post.clone();
    post.translation = lookup::<PostTranslation>(state, post.id.0, locale);
    post
}

/// Every post matching `query`'s filters, ordered, before paging.
fn matching(state: &State, query: &PostQuery) -> Vec<Post> {
    let mut posts: Vec<Post> = state
        .posts
        .values()
        .map(|post| attach(state, post, &query.locale))
        .filter(|post| query.join == LocaleJoin::Left || post.translation.is_some())
        .filter(|post| {
            query
                .conditions
                .iter()
                .all(|condition| satisfies(post, post.translation.as_ref(), condition))
        })
        .filter(|post| match query.category {
            CategoryScope::Any => true,
            CategoryScope::In(category) => state
                .categorizations
                .contains(&(post.id.0, i64::from(category))),
            CategoryScope::Uncategorized => !state
                .categorizations
                .iter()
                .any(|(post_id, _)| *post_id == post.id.0),
        })
        .filter(|post| query.tag.as_ref().is_none_or(|tag| post.has_tag(tag)))
        .collect();
    posts.sort_by(|a, b| order(a, b, query.order));
    posts
}

fn set_categories(state: &mut State, post_id: i64, category_ids: &[CategoryId]) -> DomainResult<()> {
    state.categorizations.retain(|(post, _)| *post != post_id);
    for category in category_ids {
        let category = i64::from(*category);
        if !state.categories.contains_key(&category) {
            return Err(DomainError::invalid(
                "category_ids",
                "references a missing category",
            ));
        }
        state.categorizations.insert((post_id, category));
    }
    Ok(())
}

#[async_trait]
impl PostWriteRepository for InMemoryBlogStore {
    async fn insert(&self, post: NewPost) -> DomainResult<PostId> {
        self.write(|state| {
            state.last_post_id += 1;
            let id = PostId::new(state.last_post_id)?;
            state.posts.insert(
                id.0,
                Post {
                    id,
                    draft: post.draft,
                    published_at: post.published_at,
                    access_count: 0,
                    user_id: post.user_id,
                    username: post.username,
                    source_url: post.source_url,
                    tags: post.tags,
                    translation: None,
                    created_at: post.created_at,
                    updated_at: post.created_at,
                },
            );
            for translation in post.translations.iter() {
                put_row(state, id.0, translation)?;
            }
            set_categories(state, id.0, &post.category_ids)?;
            Ok(id)
        })
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<()> {
        self.write(|state| {
            let post = state
                .posts
                .get_mut(&update.id.0)
                .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
            update.apply_base(post);
            for translation in update.translations.iter() {
                put_row(state, update.id.0, translation)?;
            }
            if let Some(category_ids) = &update.category_ids {
                set_categories(state, update.id.0, category_ids)?;
            }
            Ok(())
        })
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        self.write(|state| {
            if state.posts.remove(&id.0).is_none() {
                return Err(DomainError::NotFound("post not found".into()));
            }
            remove_owner::<PostTranslation>(state, id.0);
            state.categorizations.retain(|(post, _)| *post != id.0);
            state.comments.retain(|_, comment| comment.blog_post_id != id);
            Ok(())
        })
    }

    async fn increment_access_count(&self, id: PostId) -> DomainResult<()> {
        self.write(|state| {
            let post = state
                .posts
                .get_mut(&id.0)
                .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
            post.access_count += 1;
            Ok(())
        })
    }
}

#[async_trait]
impl PostReadRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: PostId, locale: &Locale) -> DomainResult<Option<Post>> {
        self.read(|state| Ok(state.posts.get(&id.0).map(|post| attach(state, post, locale))))
    }

    async fn find(&self, query: &PostQuery) -> DomainResult<Vec<Post>> {
        self.read(|state| {
            let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
            let limit = query
                .limit
                .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
            Ok(matching(state, query)
                .into_iter()
                .skip(offset)
                .take(limit)
                .collect())
        })
    }

    async fn count(&self, query: &PostQuery) -> DomainResult<u64> {
        self.read(|state| Ok(matching(state, query).len() as u64))
    }

    async fn category_ids(&self, id: PostId) -> DomainResult<Vec<CategoryId>> {
        self.read(|state| {
            state
                .categorizations
                .iter()
                .filter(|(post, _)| *post == id.0)
                .map(|(_, category)| CategoryId::new(*category))
                .collect()
        })
    }
}
