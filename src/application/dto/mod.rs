pub mod categories;
pub mod comments;
pub mod pagination;
pub mod posts;
pub mod serde_time;
pub mod settings;

pub use categories::CategoryDto;
pub use comments::CommentDto;
pub use pagination::Page;
pub use posts::PostDto;
pub use settings::BlogSettingsDto;
