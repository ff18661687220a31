// src/domain/category/entity.rs
use crate::domain::category::translation::CategoryTranslation;
use crate::domain::category::value_objects::CategoryId;
use crate::domain::translation::TranslationBuffer;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub translation: Option<CategoryTranslation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn title(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.title.as_str())
    }

    pub fn slug(&self) -> Option<&str> {
        self.translation.as_ref().map(|t| t.slug.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub translations: TranslationBuffer<CategoryTranslation>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: CategoryId,
    pub translations: TranslationBuffer<CategoryTranslation>,
    pub updated_at: DateTime<Utc>,
}
