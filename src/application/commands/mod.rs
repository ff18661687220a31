pub mod categories;
pub mod comments;
pub mod posts;
