pub mod category;
pub mod comment;
pub mod errors;
pub mod locale;
pub mod post;
pub mod slug;
pub mod taxonomy;
pub mod translation;
pub mod user;
