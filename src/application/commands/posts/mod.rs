// src/application/commands/posts/mod.rs
mod create;
mod delete;
mod inputs;
mod service;
mod update;
mod views;

pub use create::{CreatePostCommand, CreatePostCommandBuilder};
pub use delete::DeletePostCommand;
pub use inputs::PostTranslationInput;
pub use service::PostCommandService;
pub use update::UpdatePostCommand;
