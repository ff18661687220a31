pub mod entity;
pub mod navigation;
pub mod publish;
pub mod query;
pub mod repository;
pub mod seo;
pub mod translation;
pub mod validation;
pub mod value_objects;

pub use entity::{NewPost, Post, PostUpdate};
pub use publish::PublishState;
pub use query::{CategoryScope, LocaleJoin, PostField, PostOrder, PostQuery};
pub use repository::{PostReadRepository, PostWriteRepository};
pub use seo::SeoMeta;
pub use translation::PostTranslation;
pub use validation::PostRules;
pub use value_objects::{PostBody, PostId, PostTitle, SourceUrl, Tag};

pub type PostSlugService = crate::domain::slug::SlugService<PostTranslation>;
