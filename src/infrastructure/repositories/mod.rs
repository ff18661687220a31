// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_category;
mod postgres_comment;
mod postgres_post;
mod translations;

pub use error::map_sqlx;
pub use postgres_category::{PostgresCategoryReadRepository, PostgresCategoryWriteRepository};
pub use postgres_comment::PostgresCommentRepository;
pub use postgres_post::{PostgresPostReadRepository, PostgresPostWriteRepository};
pub use translations::{
    CATEGORY_TRANSLATIONS, POST_TRANSLATIONS, PostgresTranslationStore, TranslationTable,
};
