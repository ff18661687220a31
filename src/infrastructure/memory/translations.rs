use super::InMemoryBlogStore;
use super::state::State;
use crate::domain::category::CategoryTranslation;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::PostTranslation;
use crate::domain::translation::{TranslatedFields, TranslationStore, ensure_translated_column};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Picks the translation table of `State` that holds `Self`.
pub trait TranslationRows: TranslatedFields {
    const OWNER: &'static str;

    fn rows(state: &State) -> &BTreeMap<(i64, Locale), Self>;
    fn rows_mut(state: &mut State) -> &mut BTreeMap<(i64, Locale), Self>;
    fn owner_exists(state: &State, owner_id: i64) -> bool;
}

impl TranslationRows for PostTranslation {
    const OWNER: &'static str = "post";

    fn rows(state: &State) -> &BTreeMap<(i64, Locale), Self> {
        &state.post_translations
    }

    fn rows_mut(state: &mut State) -> &mut BTreeMap<(i64, Locale), Self> {
        &mut state.post_translations
    }

    fn owner_exists(state: &State, owner_id: i64) -> bool {
        state.posts.contains_key(&owner_id)
    }
}

impl TranslationRows for CategoryTranslation {
    const OWNER: &'static str = "category";

    fn rows(state: &State) -> &BTreeMap<(i64, Locale), Self> {
        &state.category_translations
    }

    fn rows_mut(state: &mut State) -> &mut BTreeMap<(i64, Locale), Self> {
        &mut state.category_translations
    }

    fn owner_exists(state: &State, owner_id: i64) -> bool {
        state.categories.contains_key(&owner_id)
    }
}

/// Upsert with the table constraints applied: a title may belong to one
/// owner only, a slug to one row per locale.
pub(super) fn put_row<F: TranslationRows>(state: &mut State, owner_id: i64, fields: &F) -> DomainResult<()> {
    if !F::owner_exists(state, owner_id) {
        return Err(DomainError::NotFound(format!("{} {owner_id} not found", F::OWNER)));
    }
    let key = (owner_id, fields.locale().clone());

    for ((other_owner, other_locale), row) in F::rows(state) {
        if *other_owner != owner_id && row.column("title") == fields.column("title") {
            return Err(DomainError::invalid("title", "has already been taken"));
        }
        let same_row = *other_owner == owner_id && other_locale == fields.locale();
        if !same_row && other_locale == fields.locale() && row.column("slug") == fields.column("slug") {
            return Err(DomainError::invalid("slug", "has already been taken"));
        }
    }

    F::rows_mut(state).insert(key, fields.clone());
    Ok(())
}

pub(super) fn remove_owner<F: TranslationRows>(state: &mut State, owner_id: i64) {
    F::rows_mut(state).retain(|(owner, _), _| *owner != owner_id);
}

pub(super) fn lookup<F: TranslationRows>(state: &State, owner_id: i64, locale: &Locale) -> Option<F> {
    F::rows(state).get(&(owner_id, locale.clone())).cloned()
}

#[async_trait]
impl<F: TranslationRows> TranslationStore<F> for InMemoryBlogStore {
    async fn get_translation(&self, owner_id: i64, locale: &Locale) -> DomainResult<Option<F>> {
        self.read(|state| Ok(lookup::<F>(state, owner_id, locale)))
    }

    async fn upsert_translation(&self, owner_id: i64, fields: &F) -> DomainResult<()> {
        self.write(|state| put_row(state, owner_id, fields))
    }

    async fn ids_by_translated_field(
        &self,
        field: &str,
        value: &str,
        locale: Option<&Locale>,
    ) -> DomainResult<Vec<i64>> {
        ensure_translated_column::<F>(field)?;
        self.read(|state| {
            let mut ids: Vec<i64> = F::rows(state)
                .iter()
                .filter(|((_, row_locale), _)| locale.is_none_or(|wanted| wanted == row_locale))
                .filter(|(_, row)| row.column(field) == Some(value))
                .map(|((owner, _), _)| *owner)
                .collect();
            ids.dedup();
            Ok(ids)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{CategoryTitle, CategoryWriteRepository, NewCategory};
    use crate::domain::slug::Slug;
    use crate::domain::translation::TranslationBuffer;
    use chrono::Utc;

    type Rows = dyn TranslationStore<CategoryTranslation>;

    fn row(locale: &str, title: &str, slug: &str) -> CategoryTranslation {
        CategoryTranslation {
            locale: Locale::new(locale).unwrap(),
            title: CategoryTitle::new(title).unwrap(),
            slug: Slug::new(slug).unwrap(),
        }
    }

    async fn category(store: &InMemoryBlogStore, rows: Vec<CategoryTranslation>) -> DomainResult<i64> {
        let mut translations = TranslationBuffer::new();
        for r in rows {
            translations.put(r);
        }
        let id = store
            .insert(NewCategory {
                translations,
                created_at: Utc::now(),
            })
            .await?;
        Ok(i64::from(id))
    }

    #[tokio::test]
    async fn upsert_replaces_the_locale_row() {
        let store = InMemoryBlogStore::new();
        let rows: &Rows = &store;
        let id = category(&store, vec![row("en", "Rust", "rust")]).await.unwrap();

        rows.upsert_translation(id, &row("en", "Rust lang", "rust-lang"))
            .await
            .unwrap();
        let en = Locale::new("en").unwrap();
        let stored = rows.get_translation(id, &en).await.unwrap().unwrap();
        assert_eq!(stored.slug.as_str(), "rust-lang");

        let fr = Locale::new("fr").unwrap();
        assert!(rows.get_translation(id, &fr).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn titles_and_slugs_are_constrained() {
        let store = InMemoryBlogStore::new();
        let rows: &Rows = &store;
        let first = category(&store, vec![row("en", "Rust", "rust")]).await.unwrap();
        let second = category(&store, vec![row("en", "Go", "go")]).await.unwrap();

        let err = rows
            .upsert_translation(second, &row("fr", "Rust", "rouille"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e) if e.has_field("title")));

        let err = rows
            .upsert_translation(second, &row("en", "Golang", "rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref e) if e.has_field("slug")));

        // Same slug in another locale is fine, as is reusing one's own title.
        rows.upsert_translation(second, &row("fr", "Go fr", "rust"))
            .await
            .unwrap();
        rows.upsert_translation(first, &row("fr", "Rust", "rust-fr"))
            .await
            .unwrap();

        let ids = rows
            .ids_by_translated_field("title", "Rust", None)
            .await
            .unwrap();
        assert_eq!(ids, vec![first]);
    }

    #[tokio::test]
    async fn failed_writes_leave_no_trace() {
        let store = InMemoryBlogStore::new();
        let rows: &Rows = &store;
        category(&store, vec![row("en", "Rust", "rust")]).await.unwrap();

        let rejected = category(
            &store,
            vec![row("de", "Neu", "neu"), row("en", "Rust", "other")],
        )
        .await;
        assert!(rejected.is_err());

        let ids = rows
            .ids_by_translated_field("title", "Neu", None)
            .await
            .unwrap();
        assert!(ids.is_empty());
        assert_eq!(category(&store, vec![row("en", "Go", "go")]).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn only_translated_columns_can_be_queried() {
        let store = InMemoryBlogStore::new();
        let rows: &Rows = &store;
        assert!(rows.ids_by_translated_field("body", "x", None).await.is_err());
    }
}
