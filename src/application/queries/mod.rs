// src/application/queries/mod.rs
pub mod categories;
pub mod comments;
pub mod posts;
