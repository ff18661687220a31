use super::InMemoryBlogStore;
use super::state::State;
use super::translations::{lookup, put_row, remove_owner};
use crate::domain::category::{
    Category, CategoryId, CategoryReadRepository, CategoryTranslation, CategoryUpdate,
    CategoryWriteRepository, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::post::PostId;
use crate::domain::slug::Slug;
use async_trait::async_trait;

fn attach(state: &State, category: &Category, locale: &Locale) -> Category {
    let mut category = category.clone();
    category.translation = lookup::<CategoryTranslation>(state, category.id.0, locale);
    category
}

#[async_trait]
impl CategoryWriteRepository for InMemoryBlogStore {
    async fn insert(&self, category: NewCategory) -> DomainResult<CategoryId> {
        self.write(|state| {
            state.last_category_id += 1;
            let id = CategoryId::new(state.last_category_id)?;
            state.categories.insert(
                id.0,
                Category {
                    id,
                    translation: None,
                    created_at: category.created_at,
                    updated_at: category.created_at,
                },
            );
            for translation in category.translations.iter() {
                put_row(state, id.0, translation)?;
            }
            Ok(id)
        })
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<()> {
        self.write(|state| {
            let category = state
                .categories
                .get_mut(&update.id.0)
                .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
            category.updated_at = update.updated_at;
            for translation in update.translations.iter() {
                put_row(state, update.id.0, translation)?;
            }
            Ok(())
        })
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        self.write(|state| {
            if state.categories.remove(&id.0).is_none() {
                return Err(DomainError::NotFound("category not found".into()));
            }
            remove_owner::<CategoryTranslation>(state, id.0);
            state.categorizations.retain(|(_, category)| *category != id.0);
            Ok(())
        })
    }
}

#[async_trait]
impl CategoryReadRepository for InMemoryBlogStore {
    async fn find_by_id(&self, id: CategoryId, locale: &Locale) -> DomainResult<Option<Category>> {
        self.read(|state| {
            Ok(state
                .categories
                .get(&id.0)
                .map(|category| attach(state, category, locale)))
        })
    }

    async fn find_by_slug(&self, slug: &Slug, locale: &Locale) -> DomainResult<Option<Category>> {
        self.read(|state| {
            let owner = state
                .category_translations
                .iter()
                .find(|((_, row_locale), row)| row_locale == locale && row.slug == *slug)
                .map(|((owner, _), _)| *owner);
            Ok(owner
                .and_then(|owner| state.categories.get(&owner))
                .map(|category| attach(state, category, locale)))
        })
    }

    async fn list(&self, locale: &Locale, translated_only: bool) -> DomainResult<Vec<Category>> {
        self.read(|state| {
            Ok(state
                .categories
                .values()
                .map(|category| attach(state, category, locale))
                .filter(|category| !translated_only || category.translation.is_some())
                .collect())
        })
    }

    async fn list_for_post(&self, post_id: PostId, locale: &Locale) -> DomainResult<Vec<Category>> {
        self.read(|state| {
            Ok(state
                .categories
                .values()
                .filter(|category| state.categorizations.contains(&(post_id.0, category.id.0)))
                .map(|category| attach(state, category, locale))
                .collect())
        })
    }
}
