// src/domain/category/translation.rs
use crate::domain::category::value_objects::CategoryTitle;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::locale::Locale;
use crate::domain::slug::Slug;
use crate::domain::translation::TranslatedFields;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTranslation {
    pub locale: Locale,
    pub title: CategoryTitle,
    pub slug: Slug,
}

impl TranslatedFields for CategoryTranslation {
    const COLUMNS: &'static [&'static str] = &["title", "slug"];

    fn locale(&self) -> &Locale {
        &self.locale
    }

    fn column(&self, name: &str) -> Option<&str> {
        match name {
            "title" => Some(self.title.as_str()),
            "slug" => Some(self.slug.as_str()),
            _ => None,
        }
    }

    fn from_columns<G>(locale: Locale, mut get: G) -> DomainResult<Self>
    where
        G: FnMut(&'static str) -> DomainResult<Option<String>>,
    {
        let title = get("title")?
            .ok_or_else(|| DomainError::Persistence("category title is null".into()))?;
        let slug = get("slug")?
            .ok_or_else(|| DomainError::Persistence("category slug is null".into()))?;
        Ok(Self {
            locale,
            title: CategoryTitle::new(title)?,
            slug: Slug::new(slug)?,
        })
    }
}
