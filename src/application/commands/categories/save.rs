// src/application/commands/categories/save.rs
use super::CategoryCommandService;
use crate::{
    application::{
        dto::CategoryDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        category::{CategoryId, CategoryTitle, CategoryTranslation, CategoryUpdate, NewCategory},
        errors::ValidationErrors,
        locale::Locale,
        translation::TranslationBuffer,
    },
};

#[derive(Debug, Clone)]
pub struct CategoryTranslationInput {
    pub locale: String,
    pub title: String,
}

impl CategoryTranslationInput {
    pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryCommand {
    pub translations: Vec<CategoryTranslationInput>,
}

#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: i64,
    pub translations: Vec<CategoryTranslationInput>,
}

pub struct DeleteCategoryCommand {
    pub id: i64,
}

impl CategoryCommandService {
    async fn build_translations(
        &self,
        category_id: Option<CategoryId>,
        inputs: Vec<CategoryTranslationInput>,
        errors: &mut ValidationErrors,
    ) -> ApplicationResult<TranslationBuffer<CategoryTranslation>> {
        let owner = category_id.map(i64::from);
        let mut buffer = TranslationBuffer::new();

        for input in inputs {
            let Some(locale) = errors.collect(Locale::new(input.locale))? else {
                continue;
            };
            if buffer.get(&locale).is_some() {
                errors.add("translations", format!("lists locale {locale} more than once"));
                continue;
            }
            let Some(title) = errors.collect(CategoryTitle::new(input.title))? else {
                continue;
            };

            let holders = self
                .translations
                .ids_by_translated_field("title", title.as_str(), None)
                .await?;
            if holders.iter().any(|id| Some(*id) != owner) {
                errors.add("title", "has already been taken");
                continue;
            }

            let existing = match owner {
                Some(id) => self.translations.get_translation(id, &locale).await?,
                None => None,
            };
            let slug = match existing {
                Some(current) if current.title == title => current.slug,
                _ => {
                    self.slug_service
                        .slug_for(title.as_str(), &locale, owner)
                        .await?
                }
            };

            buffer.put(CategoryTranslation {
                locale,
                title,
                slug,
            });
        }

        Ok(buffer)
    }

    pub async fn create_category(
        &self,
        command: CreateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let mut errors = ValidationErrors::new();
        let translations = self
            .build_translations(None, command.translations, &mut errors)
            .await?;
        if translations.is_empty() && errors.is_empty() {
            errors.add("title", "can't be blank");
        }
        if !errors.is_empty() {
            tracing::warn!(failures = %errors, "category rejected");
            return Err(ApplicationError::Validation(errors));
        }

        let id = self
            .write_repo
            .insert(NewCategory {
                translations,
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(category_id = %id, "category created");
        self.load(id).await
    }

    pub async fn update_category(
        &self,
        command: UpdateCategoryCommand,
    ) -> ApplicationResult<CategoryDto> {
        let id = CategoryId::new(command.id)?;
        let default_locale = self.locales.default_locale();
        if self.read_repo.find_by_id(id, &default_locale).await?.is_none() {
            return Err(ApplicationError::not_found("category not found"));
        }

        let mut errors = ValidationErrors::new();
        let translations = self
            .build_translations(Some(id), command.translations, &mut errors)
            .await?;
        if !errors.is_empty() {
            tracing::warn!(category_id = %id, failures = %errors, "category update rejected");
            return Err(ApplicationError::Validation(errors));
        }

        self.write_repo
            .update(CategoryUpdate {
                id,
                translations,
                updated_at: self.clock.now(),
            })
            .await?;
        tracing::info!(category_id = %id, "category updated");
        self.load(id).await
    }

    /// Drops the category and its categorizations; posts are kept.
    pub async fn delete_category(&self, command: DeleteCategoryCommand) -> ApplicationResult<()> {
        let id = CategoryId::new(command.id)?;
        self.write_repo.delete(id).await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }

    async fn load(&self, id: CategoryId) -> ApplicationResult<CategoryDto> {
        let category = self
            .read_repo
            .find_by_id(id, &self.locales.default_locale())
            .await?
            .ok_or_else(|| ApplicationError::not_found("category not found"))?;
        Ok(category.into())
    }
}
