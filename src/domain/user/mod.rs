pub mod author;
pub mod value_objects;

pub use author::{Author, AuthorIdentity};
pub use value_objects::{UserId, Username};
