// src/application/queries/posts/mod.rs
mod listings;
mod lookup;
mod service;
mod timeline;

pub use service::{Audience, PostQueryService};
