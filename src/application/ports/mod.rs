// src/application/ports/mod.rs
pub mod identity;
pub mod links;
pub mod locale;
pub mod settings;
pub mod time;
pub mod util;
