use crate::domain::category::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub locale: Option<String>,
    pub title: Option<String>,
    pub slug: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        let (locale, title, slug) = match category.translation {
            Some(t) => (
                Some(String::from(t.locale)),
                Some(t.title.into_inner()),
                Some(t.slug.into_inner()),
            ),
            None => (None, None, None),
        };
        Self {
            id: category.id.into(),
            locale,
            title,
            slug,
        }
    }
}
