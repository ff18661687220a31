pub mod entity;
pub mod repository;
pub mod translation;
pub mod value_objects;

pub use entity::{Category, CategoryUpdate, NewCategory};
pub use repository::{CategoryReadRepository, CategoryWriteRepository};
pub use translation::CategoryTranslation;
pub use value_objects::{CategoryId, CategoryTitle};

pub type CategorySlugService = crate::domain::slug::SlugService<CategoryTranslation>;
