// src/application/commands/categories/mod.rs
mod save;
mod service;

pub use save::{
    CategoryTranslationInput, CreateCategoryCommand, DeleteCategoryCommand, UpdateCategoryCommand,
};
pub use service::CategoryCommandService;
